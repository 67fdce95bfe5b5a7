use std::sync::Arc;

use crate::jobs::{JobOrchestrator, JobStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<JobOrchestrator>,
    /// Same store the orchestrator writes to; read directly by polling.
    pub jobs: Arc<dyn JobStore>,
}
