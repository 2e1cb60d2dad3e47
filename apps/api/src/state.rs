use std::sync::Arc;

use crate::config::Config;
use crate::interview::service::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Session state machine; owns the in-process registry, the durable
    /// store and the question generation collaborator.
    pub interviews: Arc<InterviewService>,
    pub config: Config,
}
