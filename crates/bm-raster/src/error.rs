//! Reasons a viewport query is turned away.
//!
//! Rejections are never returned as `Err` from [`TileResolver::resolve`]
//! (it reports them as an unsuccessful [`RasterResult`]); they exist so
//! callers can tell *why* via [`TileResolver::check`].
//!
//! [`TileResolver::resolve`]: crate::TileResolver::resolve
//! [`TileResolver::check`]: crate::TileResolver::check
//! [`RasterResult`]: crate::RasterResult

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueryRejection {
    #[error("query has a NaN or infinite field")]
    NonFinite,

    #[error("viewport size must be positive")]
    EmptyViewport,

    #[error("query box is inverted (upper-left must be north-west of lower-right)")]
    Inverted,

    #[error("query box lies entirely outside the world extent")]
    OutOfBounds,
}
