//! Shared error type.
//!
//! Sub-crates define their own error enums; `BmError` covers what this crate
//! validates itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `bm-core` operations.
pub type BmResult<T> = Result<T, BmError>;
