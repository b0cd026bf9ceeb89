//! Query execution against a collection's structures.

use crate::bigram::{bigrams, dice};
use crate::tokenizer::normalize_term;
use aeon_core::types::{FuzzyByBigram, FuzzyByTerm, InvertedIndex, RowId};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

/// Intersects the row ids of every term. An unknown term empties the result.
pub(crate) fn exact_row_ids(index: &InvertedIndex, terms: &[String]) -> BTreeSet<RowId> {
    intersect_terms(terms, |term| {
        index
            .get(term)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    })
}

/// Expands every term to its fuzzy neighborhood, then intersects the row ids
/// of the expanded terms.
pub(crate) fn fuzzy_row_ids(
    index: &InvertedIndex,
    by_term: &FuzzyByTerm,
    by_bigram: &FuzzyByBigram,
    threshold: f64,
    terms: &[String],
) -> BTreeSet<RowId> {
    intersect_terms(terms, |term| {
        expand_term(term, by_term, by_bigram, threshold)
            .iter()
            .filter_map(|related| index.get(related))
            .flatten()
            .copied()
            .collect()
    })
}

/// Returns the vocabulary terms similar to `term`.
///
/// Indexed terms use their stored neighbors. Unknown terms are compared on
/// the fly against the terms sharing a bigram with them.
pub(crate) fn expand_term<'a>(
    term: &str,
    by_term: &'a FuzzyByTerm,
    by_bigram: &'a FuzzyByBigram,
    threshold: f64,
) -> Cow<'a, [String]> {
    if let Some(related) = by_term.related(term) {
        return Cow::Borrowed(related);
    }

    let grams = bigrams(term);
    let candidates: HashSet<&String> = grams
        .iter()
        .filter_map(|gram| by_bigram.terms_with(gram))
        .flatten()
        .collect();

    let mut related: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| {
            candidate.as_str() == term || dice(&grams, &bigrams(candidate)) > threshold
        })
        .cloned()
        .collect();
    related.sort_unstable();

    Cow::Owned(related)
}

fn intersect_terms<F>(terms: &[String], mut row_ids_for: F) -> BTreeSet<RowId>
where
    F: FnMut(&str) -> BTreeSet<RowId>,
{
    let normalized: BTreeSet<String> = terms.iter().map(|t| normalize_term(t)).collect();

    let mut result: Option<BTreeSet<RowId>> = None;
    for term in &normalized {
        let ids = row_ids_for(term);
        let merged = match result {
            None => ids,
            Some(acc) => acc.intersection(&ids).copied().collect(),
        };

        if merged.is_empty() {
            return merged;
        }
        result = Some(merged);
    }

    result.unwrap_or_default()
}
