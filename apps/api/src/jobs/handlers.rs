//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::form::FormOptions;
use crate::models::{FormData, Job};
use crate::state::AppState;

/// POST /api/v1/jobs
///
/// Runs the full pipeline inline and returns the terminal job record.
/// Stage failures come back as a job with `status: "error"`; only an invalid
/// form is rejected outright.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Result<Json<Job>, AppError> {
    let job = state.orchestrator.submit(form).await?;
    Ok(Json(job))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    state
        .jobs
        .get(&job_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// GET /api/v1/options
///
/// Option lists for the questionnaire plus the active review source.
pub async fn handle_options(State(state): State<AppState>) -> Json<FormOptions> {
    Json(FormOptions::new(state.orchestrator.review_source()))
}
