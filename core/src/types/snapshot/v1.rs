use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Snapshot, StructureKind};

/// 0-based position of a row in its table.
pub type RowId = usize;

/// Ordered rows of a collection. A row's id is its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowTable {
    rows: Vec<String>,
}

impl Snapshot for RowTable {
    const VERSION: u8 = 1;
    const KIND: StructureKind = StructureKind::Table;
}

impl RowTable {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn get(&self, id: RowId) -> Option<&str> {
        self.rows.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Iterates rows together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &str)> + '_ {
        self.rows.iter().map(String::as_str).enumerate()
    }

    /// Returns up to `count` rows starting at `start`, clamped to the table end.
    pub fn range(&self, start: RowId, count: usize) -> &[String] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(count).min(self.rows.len());
        &self.rows[start..end]
    }
}

impl<S: Into<String>> FromIterator<S> for RowTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Token → ids of the rows containing it. Each id list is duplicate-free;
/// its order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<RowId>>,
}

impl Snapshot for InvertedIndex {
    const VERSION: u8 = 1;
    const KIND: StructureKind = StructureKind::Index;
}

impl InvertedIndex {
    pub fn from_postings(postings: BTreeMap<String, Vec<RowId>>) -> Self {
        Self { postings }
    }

    pub fn get(&self, term: &str) -> Option<&[RowId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RowId])> + '_ {
        self.postings
            .iter()
            .map(|(term, ids)| (term.as_str(), ids.as_slice()))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Token → tokens similar to it, itself included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyByTerm {
    related: BTreeMap<String, Vec<String>>,
}

impl Snapshot for FuzzyByTerm {
    const VERSION: u8 = 1;
    const KIND: StructureKind = StructureKind::FuzzyByTerm;
}

impl FuzzyByTerm {
    pub fn from_related(related: BTreeMap<String, Vec<String>>) -> Self {
        Self { related }
    }

    pub fn related(&self, term: &str) -> Option<&[String]> {
        self.related.get(term).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.related
            .iter()
            .map(|(term, related)| (term.as_str(), related.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

/// Bigram → tokens containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyByBigram {
    terms: BTreeMap<String, Vec<String>>,
}

impl Snapshot for FuzzyByBigram {
    const VERSION: u8 = 1;
    const KIND: StructureKind = StructureKind::FuzzyByBigram;
}

impl FuzzyByBigram {
    pub fn from_terms(terms: BTreeMap<String, Vec<String>>) -> Self {
        Self { terms }
    }

    pub fn terms_with(&self, bigram: &str) -> Option<&[String]> {
        self.terms.get(bigram).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.terms
            .iter()
            .map(|(bigram, terms)| (bigram.as_str(), terms.as_slice()))
    }

    /// Number of distinct bigrams.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
