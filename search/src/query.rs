//! Search query types.

use aeon_core::types::MatchMode;

/// A conjunctive query: a row matches when it satisfies every term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
    mode: MatchMode,
}

impl SearchQuery {
    pub fn new<I, S>(terms: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn exact<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(terms, MatchMode::Exact)
    }

    pub fn fuzzy<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(terms, MatchMode::Fuzzy)
    }

    /// Splits a whitespace-separated line into terms.
    pub fn parse(line: &str, mode: MatchMode) -> Self {
        Self::new(line.split_whitespace(), mode)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}
