use std::sync::Arc;

use crate::config::Config;
use crate::screening::generator::QuestionGenerator;
use crate::screening::registry::SessionRegistry;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    /// Greeting and question backend. `LlmClient` in production.
    pub generator: Arc<dyn QuestionGenerator>,
    pub store: CandidateStore,
    pub config: Config,
}
