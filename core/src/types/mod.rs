pub mod config;
pub use config::{AppConfig, Config, MatchMode};

pub(crate) mod collection_name;
pub use collection_name::{CollectionName, CollectionNameError, MAX_COLLECTION_NAME_LENGTH};

pub(crate) mod metadata;
pub use metadata::CollectionMetadata;

pub mod snapshot;
pub use snapshot::latest::{FuzzyByBigram, FuzzyByTerm, InvertedIndex, RowId, RowTable};
pub use snapshot::{Snapshot, StructureKind};
