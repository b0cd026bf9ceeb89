mod find;
mod fuzzy;
mod index;
mod persist;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::results::SearchResults;
use crate::tokenizer::normalize_term;
use aeon_core::types::{
    CollectionMetadata, CollectionName, FuzzyByBigram, FuzzyByTerm, InvertedIndex, MatchMode,
    RowId, RowTable, StructureKind,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub use index::IndexStats;
pub use persist::LoadReport;

/// One named collection. Any structure may be absent, e.g. after a partial
/// load from storage.
#[derive(Debug, Default)]
pub(crate) struct Collection {
    pub(crate) table: Option<RowTable>,
    pub(crate) index: Option<InvertedIndex>,
    pub(crate) fuzzy_by_term: Option<FuzzyByTerm>,
    pub(crate) fuzzy_by_bigram: Option<FuzzyByBigram>,
    pub(crate) metadata: Option<CollectionMetadata>,
}

/// Which structures of a collection are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStatus {
    pub rows: Option<usize>,
    pub terms: Option<usize>,
    pub has_fuzzy_by_term: bool,
    pub has_fuzzy_by_bigram: bool,
}

impl CollectionStatus {
    pub fn is_indexed(&self) -> bool {
        self.terms.is_some()
    }

    pub fn supports_fuzzy(&self) -> bool {
        self.is_indexed() && self.has_fuzzy_by_term && self.has_fuzzy_by_bigram
    }
}

/// Owns every loaded collection and runs indexing and queries against them.
pub struct SearchEngine {
    collections: HashMap<CollectionName, Collection>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            collections: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// Mutation operations.
impl SearchEngine {
    /// Creates or replaces the row table of a collection.
    ///
    /// Previously built structures are discarded; call `index` to rebuild them.
    pub fn import<I, S>(&mut self, name: CollectionName, rows: I) -> &RowTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table: RowTable = rows.into_iter().collect();
        info!(collection = %name, rows = table.len(), "imported table");

        let collection = self.collections.entry(name).or_default();
        *collection = Collection::default();
        collection.table.insert(table)
    }

    /// Builds the index and both fuzzy structures of a collection, replacing
    /// any previous ones.
    pub fn index(&mut self, name: &CollectionName) -> Result<IndexStats, SearchError> {
        self.index_with(name, None)
    }

    /// Like `index`, polling `cancel` while the vocabulary is linked.
    ///
    /// On `Err(Cancelled)` the previous structures are left untouched.
    pub fn index_cancellable(
        &mut self,
        name: &CollectionName,
        cancel: &AtomicBool,
    ) -> Result<IndexStats, SearchError> {
        self.index_with(name, Some(cancel))
    }

    /// Drops a collection from the engine. Stored data is not touched.
    pub fn remove(&mut self, name: &CollectionName) -> bool {
        self.collections.remove(name).is_some()
    }

    fn index_with(
        &mut self,
        name: &CollectionName,
        cancel: Option<&AtomicBool>,
    ) -> Result<IndexStats, SearchError> {
        let threshold = self.config.similarity_threshold();
        let collection = self.collection_mut(name)?;
        let table = collection
            .table
            .as_ref()
            .ok_or_else(|| SearchError::StructureUnavailable {
                collection: name.to_string(),
                structure: StructureKind::Table,
            })?;

        let built = index::build(table, threshold, cancel)?;
        let stats = built.stats;

        collection.index = Some(built.index);
        collection.fuzzy_by_term = Some(built.fuzzy_by_term);
        collection.fuzzy_by_bigram = Some(built.fuzzy_by_bigram);
        collection.metadata = Some(CollectionMetadata {
            similarity_threshold: threshold,
            row_count: stats.rows,
            term_count: stats.terms,
            indexed_at: Some(SystemTime::now()),
        });

        info!(
            collection = %name,
            rows = stats.rows,
            terms = stats.terms,
            bigrams = stats.bigrams,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "indexed collection"
        );
        Ok(stats)
    }
}

/// Search operations.
impl SearchEngine {
    /// Runs a query and resolves matched row ids against the row table.
    pub fn find(
        &self,
        name: &CollectionName,
        query: &SearchQuery,
    ) -> Result<SearchResults<'_>, SearchError> {
        let collection = self.collection(name)?;
        let row_ids = self.match_row_ids(name, collection, query)?;

        let table = collection
            .table
            .as_ref()
            .ok_or_else(|| SearchError::StructureUnavailable {
                collection: name.to_string(),
                structure: StructureKind::Table,
            })?;

        let (row_ids, stale): (Vec<RowId>, Vec<RowId>) =
            row_ids.into_iter().partition(|&id| id < table.len());
        if !stale.is_empty() {
            warn!(
                collection = %name,
                skipped = stale.len(),
                "index refers to rows missing from the table"
            );
        }

        Ok(SearchResults { table, row_ids })
    }

    /// Runs a query and returns the matched row ids. Needs no row table.
    pub fn find_row_ids(
        &self,
        name: &CollectionName,
        query: &SearchQuery,
    ) -> Result<BTreeSet<RowId>, SearchError> {
        let collection = self.collection(name)?;
        self.match_row_ids(name, collection, query)
    }

    /// Returns the neighbors a term expands to in fuzzy mode.
    pub fn related_terms(
        &self,
        name: &CollectionName,
        term: &str,
    ) -> Result<Vec<String>, SearchError> {
        let collection = self.collection(name)?;
        let (by_term, by_bigram) = Self::fuzzy_structures(name, collection)?;
        let term = normalize_term(term);

        let threshold = self.threshold_for(collection);

        Ok(find::expand_term(&term, by_term, by_bigram, threshold).into_owned())
    }

    fn match_row_ids(
        &self,
        name: &CollectionName,
        collection: &Collection,
        query: &SearchQuery,
    ) -> Result<BTreeSet<RowId>, SearchError> {
        let index = collection
            .index
            .as_ref()
            .ok_or_else(|| SearchError::NotIndexed(name.to_string()))?;

        let row_ids = match query.mode() {
            MatchMode::Exact => find::exact_row_ids(index, query.terms()),
            MatchMode::Fuzzy => {
                let (by_term, by_bigram) = Self::fuzzy_structures(name, collection)?;
                find::fuzzy_row_ids(
                    index,
                    by_term,
                    by_bigram,
                    self.threshold_for(collection),
                    query.terms(),
                )
            }
        };

        debug!(
            collection = %name,
            mode = %query.mode(),
            terms = ?query.terms(),
            hits = row_ids.len(),
            "ran query"
        );
        Ok(row_ids)
    }

    fn fuzzy_structures<'a>(
        name: &CollectionName,
        collection: &'a Collection,
    ) -> Result<(&'a FuzzyByTerm, &'a FuzzyByBigram), SearchError> {
        match (&collection.fuzzy_by_term, &collection.fuzzy_by_bigram) {
            (Some(by_term), Some(by_bigram)) => Ok((by_term, by_bigram)),
            _ => Err(SearchError::FuzzyUnavailable(name.to_string())),
        }
    }

    /// Threshold the collection's fuzzy structures were built with.
    fn threshold_for(&self, collection: &Collection) -> f64 {
        collection
            .metadata
            .as_ref()
            .map_or(self.config.similarity_threshold(), |m| {
                m.similarity_threshold
            })
    }
}

/// Read operations.
impl SearchEngine {
    /// Returns the loaded collection names, sorted.
    pub fn collections(&self) -> Vec<&CollectionName> {
        let mut names: Vec<&CollectionName> = self.collections.keys().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &CollectionName) -> bool {
        self.collections.contains_key(name)
    }

    pub fn status(&self, name: &CollectionName) -> Result<CollectionStatus, SearchError> {
        let collection = self.collection(name)?;
        Ok(CollectionStatus {
            rows: collection.table.as_ref().map(RowTable::len),
            terms: collection.index.as_ref().map(InvertedIndex::len),
            has_fuzzy_by_term: collection.fuzzy_by_term.is_some(),
            has_fuzzy_by_bigram: collection.fuzzy_by_bigram.is_some(),
        })
    }

    pub fn table(&self, name: &CollectionName) -> Result<&RowTable, SearchError> {
        self.collection(name)?
            .table
            .as_ref()
            .ok_or_else(|| SearchError::StructureUnavailable {
                collection: name.to_string(),
                structure: StructureKind::Table,
            })
    }

    /// Returns up to `count` rows starting at row `start`.
    pub fn rows(
        &self,
        name: &CollectionName,
        start: RowId,
        count: usize,
    ) -> Result<&[String], SearchError> {
        Ok(self.table(name)?.range(start, count))
    }

    pub fn inverted_index(&self, name: &CollectionName) -> Result<&InvertedIndex, SearchError> {
        self.collection(name)?
            .index
            .as_ref()
            .ok_or_else(|| SearchError::NotIndexed(name.to_string()))
    }

    pub fn fuzzy_by_term(&self, name: &CollectionName) -> Result<&FuzzyByTerm, SearchError> {
        let collection = self.collection(name)?;
        Ok(Self::fuzzy_structures(name, collection)?.0)
    }

    pub fn fuzzy_by_bigram(&self, name: &CollectionName) -> Result<&FuzzyByBigram, SearchError> {
        let collection = self.collection(name)?;
        Ok(Self::fuzzy_structures(name, collection)?.1)
    }
}

/// Internal helpers.
impl SearchEngine {
    fn collection(&self, name: &CollectionName) -> Result<&Collection, SearchError> {
        self.collections
            .get(name)
            .ok_or_else(|| SearchError::CollectionNotFound(name.to_string()))
    }

    fn collection_mut(&mut self, name: &CollectionName) -> Result<&mut Collection, SearchError> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| SearchError::CollectionNotFound(name.to_string()))
    }
}
