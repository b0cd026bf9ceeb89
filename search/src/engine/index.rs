use crate::engine::fuzzy::FuzzyGraphBuilder;
use crate::error::SearchError;
use crate::tokenizer::tokenize;
use aeon_core::types::{FuzzyByBigram, FuzzyByTerm, InvertedIndex, RowId, RowTable};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Counters describing one indexing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub rows: usize,
    pub terms: usize,
    pub bigrams: usize,
    pub elapsed: Duration,
}

/// The three structures derived from a row table.
pub(crate) struct BuiltIndex {
    pub(crate) index: InvertedIndex,
    pub(crate) fuzzy_by_term: FuzzyByTerm,
    pub(crate) fuzzy_by_bigram: FuzzyByBigram,
    pub(crate) stats: IndexStats,
}

/// Tokenizes every row and builds the index and both fuzzy structures in a
/// single pass.
///
/// A term's fuzzy links are computed once, when the term first appears;
/// terms seen later link back to it from their own first appearance.
///
/// `cancel` is polled once per new term. Returns `Err(Cancelled)` if it is set.
pub(crate) fn build(
    table: &RowTable,
    threshold: f64,
    cancel: Option<&AtomicBool>,
) -> Result<BuiltIndex, SearchError> {
    let started = Instant::now();
    let mut postings: HashMap<String, Vec<RowId>> = HashMap::new();
    let mut fuzzy = FuzzyGraphBuilder::new(threshold);

    for (row_id, row) in table.iter() {
        for token in tokenize(row) {
            match postings.entry(token) {
                Entry::Occupied(mut entry) => {
                    let ids = entry.get_mut();
                    if ids.last() != Some(&row_id) {
                        ids.push(row_id);
                    }
                }
                Entry::Vacant(entry) => {
                    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                        return Err(SearchError::Cancelled);
                    }
                    fuzzy.link(entry.key());
                    entry.insert(vec![row_id]);
                }
            }
        }
    }

    let index = InvertedIndex::from_postings(postings.into_iter().collect());
    let (fuzzy_by_term, fuzzy_by_bigram) = fuzzy.finish();

    let stats = IndexStats {
        rows: table.len(),
        terms: index.len(),
        bigrams: fuzzy_by_bigram.len(),
        elapsed: started.elapsed(),
    };

    Ok(BuiltIndex {
        index,
        fuzzy_by_term,
        fuzzy_by_bigram,
        stats,
    })
}
