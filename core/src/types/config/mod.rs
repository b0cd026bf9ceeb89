mod app;
mod core;

pub use app::{
    AppConfig, AppConfigError, DEFAULT_SIMILARITY_THRESHOLD, IndexingConfig, MatchMode,
    QueryConfig,
};
pub use core::Config;
