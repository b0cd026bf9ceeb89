//! Database layer for aeon storage.
//!
//! This module handles all redb operations including:
//! - One table per collection structure (CollectionName → snapshot bytes)
//! - Metadata storage (JSON strings)
//!
//! Snapshot bytes are opaque here; encoding and decoding live in
//! `types::snapshot`.

use crate::core::db::error::DatabaseError;
use crate::types::{CollectionMetadata, CollectionName, Config, StructureKind};
use redb::{ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use std::collections::BTreeSet;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("Metadata error: {0}")]
        Metadata(#[from] serde_json::Error),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

type SnapshotTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// Row tables: CollectionName → encoded RowTable
const TABLE_TABLE: SnapshotTable = TableDefinition::new("tables");

/// Inverted indexes: CollectionName → encoded InvertedIndex
const INDEX_TABLE: SnapshotTable = TableDefinition::new("indexes");

/// Fuzzy dictionaries: CollectionName → encoded FuzzyByTerm
const FUZZY_TERM_TABLE: SnapshotTable = TableDefinition::new("fuzzy_by_term");

/// Bigram dictionaries: CollectionName → encoded FuzzyByBigram
const FUZZY_BIGRAM_TABLE: SnapshotTable = TableDefinition::new("fuzzy_by_bigram");

/// Metadata table: CollectionName → JSON string
const METADATA_TABLE: TableDefinition<&str, &str> = TableDefinition::new("metadata");

const fn table_for(kind: StructureKind) -> SnapshotTable {
    match kind {
        StructureKind::Table => TABLE_TABLE,
        StructureKind::Index => INDEX_TABLE,
        StructureKind::FuzzyByTerm => FUZZY_TERM_TABLE,
        StructureKind::FuzzyByBigram => FUZZY_BIGRAM_TABLE,
    }
}

/// Structures derived from a row table by an indexing pass.
const DERIVED: [StructureKind; 3] = [
    StructureKind::Index,
    StructureKind::FuzzyByTerm,
    StructureKind::FuzzyByBigram,
];

/// Encoded structures produced by one indexing pass, written together.
pub struct IndexedSnapshots<'a> {
    pub index: &'a [u8],
    pub fuzzy_by_term: &'a [u8],
    pub fuzzy_by_bigram: &'a [u8],
    pub metadata: &'a CollectionMetadata,
}

/// The main database struct wrapping redb.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Creates or opens a database using paths from the config.
    pub fn new(config: &Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            for kind in StructureKind::ALL {
                let _ = write_txn.open_table(table_for(kind))?;
            }
            let _ = write_txn.open_table(METADATA_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Write operations.
impl Database {
    /// Stores a row table, replacing any previous one.
    ///
    /// Derived structures and metadata of the collection are removed in the
    /// same transaction since their row ids refer to the replaced rows.
    pub fn put_table(&mut self, name: &CollectionName, bytes: &[u8]) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut tables = write_txn.open_table(TABLE_TABLE)?;
            tables.insert(name.as_str(), bytes)?;
        }
        for kind in DERIVED {
            Self::remove_structure(&write_txn, kind, name)?;
        }
        Self::remove_metadata(&write_txn, name)?;

        write_txn.commit()?;
        Ok(())
    }

    /// Stores the output of an indexing pass in a single transaction.
    pub fn put_indexed(
        &mut self,
        name: &CollectionName,
        snapshots: IndexedSnapshots<'_>,
    ) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(snapshots.metadata)?;
        let write_txn = self.db.begin_write()?;

        {
            let mut indexes = write_txn.open_table(INDEX_TABLE)?;
            indexes.insert(name.as_str(), snapshots.index)?;

            let mut by_term = write_txn.open_table(FUZZY_TERM_TABLE)?;
            by_term.insert(name.as_str(), snapshots.fuzzy_by_term)?;

            let mut by_bigram = write_txn.open_table(FUZZY_BIGRAM_TABLE)?;
            by_bigram.insert(name.as_str(), snapshots.fuzzy_by_bigram)?;

            let mut metadata = write_txn.open_table(METADATA_TABLE)?;
            metadata.insert(name.as_str(), json.as_str())?;
        }

        write_txn.commit()?;
        Ok(())
    }

    /// Removes every structure of a collection.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, name: &CollectionName) -> Result<bool, DatabaseError> {
        let write_txn = self.db.begin_write()?;

        let mut removed = false;
        for kind in StructureKind::ALL {
            removed |= Self::remove_structure(&write_txn, kind, name)?;
        }
        removed |= Self::remove_metadata(&write_txn, name)?;

        write_txn.commit()?;
        Ok(removed)
    }
}

/// Read operations.
impl Database {
    /// Returns the encoded structure, if stored.
    pub fn get(
        &self,
        kind: StructureKind,
        name: &CollectionName,
    ) -> Result<Option<Vec<u8>>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_for(kind))?;

        Ok(table.get(name.as_str())?.map(|guard| guard.value().to_vec()))
    }

    /// Returns the metadata JSON of a collection, if stored.
    pub fn get_metadata(&self, name: &CollectionName) -> Result<Option<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(METADATA_TABLE)?;

        Ok(table
            .get(name.as_str())?
            .map(|guard| guard.value().to_string()))
    }

    /// Returns the raw names present in any structure table, sorted.
    pub fn names(&self) -> Result<Vec<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let mut names = BTreeSet::new();

        for kind in StructureKind::ALL {
            let table = read_txn.open_table(table_for(kind))?;
            for entry in table.iter()? {
                let (name_guard, _) = entry?;
                names.insert(name_guard.value().to_string());
            }
        }

        Ok(names.into_iter().collect())
    }
}

/// Internal helpers.
impl Database {
    fn remove_structure(
        txn: &WriteTransaction,
        kind: StructureKind,
        name: &CollectionName,
    ) -> Result<bool, DatabaseError> {
        let mut table = txn.open_table(table_for(kind))?;
        Ok(table.remove(name.as_str())?.is_some())
    }

    fn remove_metadata(txn: &WriteTransaction, name: &CollectionName) -> Result<bool, DatabaseError> {
        let mut table = txn.open_table(METADATA_TABLE)?;
        Ok(table.remove(name.as_str())?.is_some())
    }

    /// Overwrites a stored structure with arbitrary bytes.
    #[cfg(test)]
    pub(crate) fn put_raw(
        &mut self,
        kind: StructureKind,
        name: &CollectionName,
        bytes: &[u8],
    ) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table_for(kind))?;
            table.insert(name.as_str(), bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
