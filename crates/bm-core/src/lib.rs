//! `bm-core`: foundational types for the `bearmap` map services.
//!
//! This crate is a dependency of every other `bm-*` crate.  It has no `bm-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`                                              |
//! | [`geo`]         | `GeoPoint`, `GeoBox`                                  |
//! | [`extent`]      | `WorldExtent` (tile pyramid configuration)            |
//! | [`error`]       | `BmError`, `BmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod extent;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BmError, BmResult};
pub use extent::WorldExtent;
pub use geo::{GeoBox, GeoPoint};
pub use ids::NodeId;
