use crate::error::SearchError;
use aeon_core::types::config::DEFAULT_SIMILARITY_THRESHOLD;
use aeon_core::types::{AppConfig, MatchMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    similarity_threshold: f64,
    default_mode: MatchMode,
}

impl SearchConfig {
    /// Returns `Err(InvalidThreshold)` unless `0 < similarity_threshold <= 1`.
    pub fn new(similarity_threshold: f64) -> Result<Self, SearchError> {
        if !(similarity_threshold > 0.0 && similarity_threshold <= 1.0) {
            return Err(SearchError::InvalidThreshold(similarity_threshold));
        }

        Ok(Self {
            similarity_threshold,
            default_mode: MatchMode::default(),
        })
    }

    pub fn with_default_mode(self, default_mode: MatchMode) -> Self {
        Self {
            default_mode,
            ..self
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn default_mode(&self) -> MatchMode {
        self.default_mode
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            default_mode: MatchMode::default(),
        }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        let config = config.with_defaults_for_invalid();
        Self {
            similarity_threshold: config.indexing.similarity_threshold,
            default_mode: config.query.default_mode,
        }
    }
}
