//! `bm-search`: name search and coordinate snapping.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`trie`]     | `PrefixTrie` over the `' '`, `a`–`z` alphabet              |
//! | [`location`] | `LocationIndex`, `Location`, `clean_name`                  |
//! | [`error`]    | `TrieError`, `SearchError`, `SearchResult<T>`              |
//!
//! The index is built once from a [`bm_spatial::StreetGraph`] and is
//! read-only afterwards, so it can be shared across request threads behind
//! a plain `Arc`.

pub mod error;
pub mod location;
pub mod trie;


pub use error::{SearchError, SearchResult, TrieError};
pub use location::{Location, LocationIndex, clean_name};
pub use trie::PrefixTrie;
