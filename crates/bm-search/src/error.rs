//! Search-subsystem error types.

use thiserror::Error;

use bm_core::{GeoPoint, NodeId};

/// Keys rejected by [`PrefixTrie::add`](crate::PrefixTrie::add).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("trie keys must not be empty")]
    EmptyKey,

    #[error("unsupported character {ch:?} at position {position}; keys use ' ' and a-z only")]
    UnsupportedSymbol { ch: char, position: usize },
}

/// Failures while assembling a [`LocationIndex`](crate::LocationIndex).
///
/// All of these are construction-time problems with the input graph.  Queries
/// against a built index never fail.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("graph has no node with at least one neighbor; nothing to snap to")]
    NoRoutableNodes,

    #[error("node {id} has non-finite coordinate {pos}")]
    InvalidCoordinate { id: NodeId, pos: GeoPoint },

    #[error(transparent)]
    Trie(#[from] TrieError),
}

pub type SearchResult<T> = Result<T, SearchError>;
