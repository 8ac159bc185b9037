use std::sync::Arc;

use crate::ats::scoring::{CompatibilityScorer, KeywordCompatibilityScorer};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: KeywordCompatibilityScorer built from `config.scorer`.
    pub scorer: Arc<dyn CompatibilityScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let scorer = Arc::new(KeywordCompatibilityScorer::new(config.scorer.clone()));
        Self { config, scorer }
    }
}
