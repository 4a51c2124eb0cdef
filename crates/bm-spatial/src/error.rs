//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `bm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("edge references unknown node id {0}")]
    UnknownNode(i64),

    #[error("node id {0} appears more than once")]
    DuplicateNode(i64),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
