//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET  /                    -> list_jobs       (?limit)
/// GET  /{id}                -> get_job
/// GET  /{id}/columns        -> get_job_columns
/// GET  /{id}/logs           -> get_job_logs
/// GET  /{id}/records        -> get_job_records (?partition)
/// POST /{id}/revalidate     -> revalidate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs))
        .route("/{id}", get(jobs::get_job))
        .route("/{id}/columns", get(jobs::get_job_columns))
        .route("/{id}/logs", get(jobs::get_job_logs))
        .route("/{id}/records", get(jobs::get_job_records))
        .route("/{id}/revalidate", post(jobs::revalidate))
}
