use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable backend. Default: LlmResumeGenerator.
    pub generator: Arc<dyn ResumeGenerator>,
    pub store: Arc<ResumeStore>,
    pub config: Config,
}
