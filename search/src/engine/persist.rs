//! Moving collections between the engine and an `AeonCore` store.

use super::{Collection, SearchEngine};
use crate::error::SearchError;
use aeon_core::types::{CollectionMetadata, CollectionName, StructureKind};
use aeon_core::{AeonCore, AeonError, IndexedStructures};
use tracing::{info, warn};

/// Outcome of loading one collection from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub collection: CollectionName,
    pub loaded: Vec<StructureKind>,
    pub missing: Vec<StructureKind>,
    pub corrupted: Vec<StructureKind>,
    pub rows: Option<usize>,
    pub terms: Option<usize>,
}

impl LoadReport {
    fn new(collection: CollectionName) -> Self {
        Self {
            collection,
            loaded: Vec::new(),
            missing: Vec::new(),
            corrupted: Vec::new(),
            rows: None,
            terms: None,
        }
    }

    /// True when all four structures were recovered.
    pub fn is_complete(&self) -> bool {
        self.loaded.len() == StructureKind::ALL.len()
    }

    /// Structures that could not be recovered, as errors for the caller.
    pub fn unavailable(&self) -> impl Iterator<Item = SearchError> + '_ {
        self.missing
            .iter()
            .chain(&self.corrupted)
            .map(|&structure| SearchError::StructureUnavailable {
                collection: self.collection.to_string(),
                structure,
            })
    }

    fn record<T>(
        &mut self,
        kind: StructureKind,
        result: Result<Option<T>, AeonError>,
    ) -> Result<Option<T>, SearchError> {
        match result {
            Ok(Some(structure)) => {
                self.loaded.push(kind);
                Ok(Some(structure))
            }
            Ok(None) => {
                warn!(collection = %self.collection, structure = %kind, "could not read structure");
                self.missing.push(kind);
                Ok(None)
            }
            Err(AeonError::Corrupted { source, .. }) => {
                warn!(
                    collection = %self.collection,
                    structure = %kind,
                    error = %source,
                    "structure is corrupted"
                );
                self.corrupted.push(kind);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Storage operations.
impl SearchEngine {
    /// Loads whatever structures of a collection are stored, replacing the
    /// in-memory collection of that name.
    ///
    /// Missing or corrupted structures are reported, not fatal: a collection
    /// with an index but no fuzzy structures still answers exact queries.
    /// Returns `Err(CollectionNotFound)` only if nothing is stored at all.
    pub fn load(
        &mut self,
        core: &AeonCore,
        name: &CollectionName,
    ) -> Result<LoadReport, SearchError> {
        let mut report = LoadReport::new(name.clone());

        let table = report.record(StructureKind::Table, core.load_table(name))?;
        let index = report.record(StructureKind::Index, core.load_index(name))?;
        let fuzzy_by_term =
            report.record(StructureKind::FuzzyByTerm, core.load_fuzzy_by_term(name))?;
        let fuzzy_by_bigram =
            report.record(StructureKind::FuzzyByBigram, core.load_fuzzy_by_bigram(name))?;

        if report.loaded.is_empty() && report.corrupted.is_empty() {
            return Err(SearchError::CollectionNotFound(name.to_string()));
        }

        report.rows = table.as_ref().map(|t| t.len());
        report.terms = index.as_ref().map(|i| i.len());

        if let Some(rows) = report.rows {
            info!(collection = %name, rows, "recovered table");
        }
        if let Some(terms) = report.terms {
            info!(collection = %name, terms, "recovered index");
        }

        let metadata = core.load_metadata(name)?;
        self.collections.insert(
            name.clone(),
            Collection {
                table,
                index,
                fuzzy_by_term,
                fuzzy_by_bigram,
                metadata,
            },
        );

        Ok(report)
    }

    /// Loads every stored collection.
    pub fn load_all(&mut self, core: &AeonCore) -> Result<Vec<LoadReport>, SearchError> {
        let names = core.collections()?;
        let mut reports = Vec::with_capacity(names.len());

        for name in &names {
            reports.push(self.load(core, name)?);
        }

        info!(collections = reports.len(), "aeon ready");
        Ok(reports)
    }

    /// Writes the row table of a collection. Stored index structures of the
    /// collection are dropped by the store.
    pub fn persist_table(
        &self,
        core: &mut AeonCore,
        name: &CollectionName,
    ) -> Result<(), SearchError> {
        core.save_table(name, self.table(name)?)?;
        Ok(())
    }

    /// Writes the index and both fuzzy structures of a collection.
    pub fn persist_index(
        &self,
        core: &mut AeonCore,
        name: &CollectionName,
    ) -> Result<(), SearchError> {
        let collection = self.collection(name)?;
        let index = collection
            .index
            .as_ref()
            .ok_or_else(|| SearchError::NotIndexed(name.to_string()))?;
        let (fuzzy_by_term, fuzzy_by_bigram) = Self::fuzzy_structures(name, collection)?;

        let metadata = collection
            .metadata
            .clone()
            .unwrap_or_else(|| CollectionMetadata {
                similarity_threshold: self.config.similarity_threshold(),
                row_count: collection.table.as_ref().map_or(0, |t| t.len()),
                term_count: index.len(),
                indexed_at: None,
            });

        core.save_indexed(
            name,
            IndexedStructures {
                index,
                fuzzy_by_term,
                fuzzy_by_bigram,
                metadata: &metadata,
            },
        )?;
        Ok(())
    }
}
