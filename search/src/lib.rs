//! Aeon indexing and search library.
//!
//! Builds an inverted index over the rows of a collection and answers exact
//! and fuzzy multi-term queries.
//!
//! # Design
//!
//! - One indexing pass produces three structures: the inverted index
//!   (token → row ids), the bigram dictionary (bigram → tokens) and the
//!   fuzzy dictionary (token → similar tokens).
//! - Fuzzy links are computed once per token, at its first occurrence, and
//!   only against tokens sharing a bigram with it.
//! - Queries are conjunctive: every term must match, either directly or
//!   through its fuzzy neighborhood.
//!
//! # API
//!
//! - `SearchEngine::import()`: Sets the rows of a collection
//! - `SearchEngine::index()`: Builds the collection's structures
//! - `SearchEngine::find()`: Runs a `SearchQuery` and resolves matched rows
//! - `SearchEngine::load()`, `persist_table()`, `persist_index()`: Moves
//!   collections to and from an `AeonCore` store

pub mod bigram;
mod config;
mod engine;
mod error;
mod query;
mod results;
pub mod tokenizer;

pub use aeon_core::types::MatchMode;
pub use config::SearchConfig;
pub use engine::{CollectionStatus, IndexStats, LoadReport, SearchEngine};
pub use error::SearchError;
pub use query::SearchQuery;
pub use results::SearchResults;

#[cfg(test)]
mod tests;
