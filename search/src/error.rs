use aeon_core::AeonError;
use aeon_core::types::StructureKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Collection {0} does not exist")]
    CollectionNotFound(String),

    #[error("Index {0} does not exist")]
    NotIndexed(String),

    #[error("Fuzzy structures for {0} do not exist")]
    FuzzyUnavailable(String),

    #[error("{structure} unavailable for collection {collection}")]
    StructureUnavailable {
        collection: String,
        structure: StructureKind,
    },

    #[error("Similarity threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Indexing was cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(#[from] AeonError),
}
