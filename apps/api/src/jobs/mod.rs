// Job lifecycle: in-memory store, stage orchestration, HTTP handlers.

pub mod handlers;
pub mod orchestrator;
pub mod store;

pub use orchestrator::{JobOrchestrator, ReviewAcquisition};
pub use store::{InMemoryJobStore, JobStore};
