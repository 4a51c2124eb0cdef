//! `bm-raster`: turn viewport queries into tile grids.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`tile`]     | `TileId` (`d{depth}_x{x}_y{y}.png` addressing)              |
//! | [`resolver`] | `ViewportQuery`, `TileResolver`, `RasterResult`, `RasterResponse` |
//! | [`composer`] | `TileComposer`, `ComposerConfig`, `CompositionPlan`        |
//! | [`error`]    | `QueryRejection`                                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `TileResolver::resolve_all` fans out over Rayon.          |
//! | `serde`    | `Serialize`/`Deserialize` on queries, responses, plans.   |

pub mod composer;
pub mod error;
pub mod resolver;
pub mod tile;


pub use composer::{ComposerConfig, CompositionPlan, PixelPoint, TileComposer, TilePlacement};
pub use error::QueryRejection;
pub use resolver::{RasterResponse, RasterResult, TileResolver, ViewportQuery};
pub use tile::TileId;
