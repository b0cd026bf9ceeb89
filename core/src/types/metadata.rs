//! Metadata persisted alongside a collection's structures.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Describes the last indexing pass over a collection. Missing fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Threshold the fuzzy structures were built with.
    pub similarity_threshold: f64,
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub term_count: usize,
    #[serde(default)]
    pub indexed_at: Option<SystemTime>,
}
