//! Storage and domain types for the aeon search engine.
//!
//! A collection is a named bundle of four structures: the row table, its
//! inverted index, and the two fuzzy dictionaries. This crate defines those
//! structures and persists them; building and querying them lives in
//! `aeon_search`.

pub mod core;
pub mod types;

pub use crate::core::error::AeonError;
pub use crate::core::{AeonCore, IndexedStructures};
