use crate::bigram::{Bigrams, bigrams, dice};
use aeon_core::types::{FuzzyByBigram, FuzzyByTerm};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Incrementally links each newly seen term to the similar terms known so far.
///
/// Candidates for a term are only the terms sharing at least one bigram with
/// it, found through the bigram dictionary, so the vocabulary is never
/// compared pairwise.
pub(crate) struct FuzzyGraphBuilder {
    threshold: f64,
    bigrams_by_term: HashMap<String, Bigrams>,
    by_bigram: HashMap<String, HashSet<String>>,
    by_term: HashMap<String, HashSet<String>>,
}

impl FuzzyGraphBuilder {
    pub(crate) fn new(threshold: f64) -> Self {
        Self {
            threshold,
            bigrams_by_term: HashMap::new(),
            by_bigram: HashMap::new(),
            by_term: HashMap::new(),
        }
    }

    /// Registers `term` and links it with its similar candidates, both ways.
    ///
    /// Called once per distinct term, at its first occurrence.
    pub(crate) fn link(&mut self, term: &str) {
        let grams = bigrams(term);

        for gram in &grams {
            self.by_bigram
                .entry(gram.clone())
                .or_default()
                .insert(term.to_owned());
        }

        let candidates: HashSet<&str> = grams
            .iter()
            .filter_map(|gram| self.by_bigram.get(gram))
            .flatten()
            .map(String::as_str)
            .collect();

        let mut related = HashSet::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate == term {
                related.insert(term.to_owned());
                continue;
            }

            let score = match self.bigrams_by_term.get(candidate) {
                Some(theirs) => dice(&grams, theirs),
                None => dice(&grams, &bigrams(candidate)),
            };

            if score > self.threshold {
                // Entries are created lazily: the candidate may not own one yet.
                self.by_term
                    .entry(candidate.to_owned())
                    .or_default()
                    .insert(term.to_owned());
                related.insert(candidate.to_owned());
            }
        }

        self.by_term
            .entry(term.to_owned())
            .or_default()
            .extend(related);
        self.bigrams_by_term.insert(term.to_owned(), grams);
    }

    pub(crate) fn finish(self) -> (FuzzyByTerm, FuzzyByBigram) {
        (
            FuzzyByTerm::from_related(into_sorted(self.by_term)),
            FuzzyByBigram::from_terms(into_sorted(self.by_bigram)),
        )
    }
}

fn into_sorted(map: HashMap<String, HashSet<String>>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(key, values)| {
            let mut values: Vec<String> = values.into_iter().collect();
            values.sort_unstable();
            (key, values)
        })
        .collect()
}
