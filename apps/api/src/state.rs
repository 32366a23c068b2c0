use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Completer;
use crate::skills::market::ReferenceData;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient`; tests swap in a stub.
    pub completer: Arc<dyn Completer>,
    pub config: Config,
    /// Vocabulary, job corpus and market ranking, loaded once at startup.
    pub reference: Arc<ReferenceData>,
}
