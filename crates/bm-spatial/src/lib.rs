//! `bm-spatial`: street graph, loaders, and nearest-point indexing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `StreetGraph` trait, `GraphNode`                            |
//! | [`network`] | `StreetNetwork` (CSR), `StreetNetworkBuilder`               |
//! | [`index`]   | `PointIndex` trait, `RTreeIndex`, `LinearScanIndex`         |
//! | [`loader`]  | `load_network_csv`, `load_network_reader`                   |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on `bm-core` types.        |

pub mod error;
pub mod graph;
pub mod index;
pub mod loader;
pub mod network;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::{GraphNode, StreetGraph};
pub use index::{LinearScanIndex, PointIndex, RTreeIndex};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{StreetNetwork, StreetNetworkBuilder};
