//! Persistence adapter for collection structures.

use crate::core::db::error::DatabaseError;
use crate::core::db::{Database, IndexedSnapshots};
use crate::types::snapshot::error::SnapshotError;
use crate::types::{
    CollectionMetadata, CollectionName, Config, FuzzyByBigram, FuzzyByTerm, InvertedIndex,
    RowTable, Snapshot, StructureKind,
};
use error::AeonError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub(crate) mod db;

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum AeonError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("Snapshot error: {0}")]
        Snapshot(#[from] SnapshotError),

        #[error("{kind} of collection {collection} is corrupted: {source}")]
        Corrupted {
            collection: String,
            kind: StructureKind,
            #[source]
            source: SnapshotError,
        },
    }
}

pub struct AeonCore {
    base_path: PathBuf,
    db: Database,
}

/// Structures produced by one indexing pass over a row table.
pub struct IndexedStructures<'a> {
    pub index: &'a InvertedIndex,
    pub fuzzy_by_term: &'a FuzzyByTerm,
    pub fuzzy_by_bigram: &'a FuzzyByBigram,
    pub metadata: &'a CollectionMetadata,
}

impl AeonCore {
    pub fn open(config: Config) -> Result<Self, AeonError> {
        let db = Database::new(&config)?;
        info!(path = %config.db_path().display(), "opened aeon store");

        Ok(Self {
            base_path: config.base_path,
            db,
        })
    }

    /// Returns the base data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.base_path
    }
}

/// Write operations.
impl AeonCore {
    /// Stores a row table. Any previously stored index and fuzzy structures of
    /// the collection are dropped, since they describe the replaced rows.
    pub fn save_table(&mut self, name: &CollectionName, table: &RowTable) -> Result<(), AeonError> {
        self.db.put_table(name, &table.encode()?)?;
        info!(collection = %name, rows = table.len(), "saved table");
        Ok(())
    }

    /// Stores index, fuzzy structures and metadata as one atomic write.
    pub fn save_indexed(
        &mut self,
        name: &CollectionName,
        structures: IndexedStructures<'_>,
    ) -> Result<(), AeonError> {
        let index = structures.index.encode()?;
        let fuzzy_by_term = structures.fuzzy_by_term.encode()?;
        let fuzzy_by_bigram = structures.fuzzy_by_bigram.encode()?;

        self.db.put_indexed(
            name,
            IndexedSnapshots {
                index: &index,
                fuzzy_by_term: &fuzzy_by_term,
                fuzzy_by_bigram: &fuzzy_by_bigram,
                metadata: structures.metadata,
            },
        )?;

        info!(
            collection = %name,
            terms = structures.index.len(),
            bigrams = structures.fuzzy_by_bigram.len(),
            "saved index"
        );
        Ok(())
    }

    /// Permanently deletes every structure of a collection.
    ///
    /// Returns `false` if nothing was stored under the name.
    pub fn remove(&mut self, name: &CollectionName) -> Result<bool, AeonError> {
        Ok(self.db.remove(name)?)
    }
}

/// Read operations.
impl AeonCore {
    pub fn load_table(&self, name: &CollectionName) -> Result<Option<RowTable>, AeonError> {
        self.load(name)
    }

    pub fn load_index(&self, name: &CollectionName) -> Result<Option<InvertedIndex>, AeonError> {
        self.load(name)
    }

    pub fn load_fuzzy_by_term(
        &self,
        name: &CollectionName,
    ) -> Result<Option<FuzzyByTerm>, AeonError> {
        self.load(name)
    }

    pub fn load_fuzzy_by_bigram(
        &self,
        name: &CollectionName,
    ) -> Result<Option<FuzzyByBigram>, AeonError> {
        self.load(name)
    }

    /// Returns the metadata of the last indexing pass.
    ///
    /// Malformed metadata is treated as absent.
    pub fn load_metadata(
        &self,
        name: &CollectionName,
    ) -> Result<Option<CollectionMetadata>, AeonError> {
        let Some(json) = self.db.get_metadata(name)? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(err) => {
                warn!(collection = %name, error = %err, "ignoring malformed metadata");
                Ok(None)
            }
        }
    }

    /// Returns every collection with at least one stored structure, sorted.
    pub fn collections(&self) -> Result<Vec<CollectionName>, AeonError> {
        let mut names = Vec::new();

        for raw in self.db.names()? {
            match CollectionName::try_new(raw.clone()) {
                Ok(name) => names.push(name),
                Err(err) => warn!(name = %raw, error = %err, "skipping invalid collection name"),
            }
        }

        Ok(names)
    }

    fn load<S: Snapshot>(&self, name: &CollectionName) -> Result<Option<S>, AeonError> {
        let Some(bytes) = self.db.get(S::KIND, name)? else {
            return Ok(None);
        };

        S::decode(&bytes)
            .map(Some)
            .map_err(|source| AeonError::Corrupted {
                collection: name.to_string(),
                kind: S::KIND,
                source,
            })
    }
}
