//! Handlers for the `/jobs` resource: summaries, captured column order,
//! partitioned records, the validation log, and full-job revalidation.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use rowsift_core::error::CoreError;
use rowsift_core::job::Partition;
use rowsift_core::types::DbId;
use rowsift_db::models::job::Job;
use rowsift_db::repositories::{JobRepo, LogRepo, RecordRepo};
use rowsift_pipeline::{revalidate_job, JobSummary};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing jobs.
#[derive(Debug, Deserialize)]
pub struct ListJobsParams {
    pub limit: Option<i64>,
}

/// Query parameters for listing a job's records.
#[derive(Debug, Deserialize)]
pub struct ListRecordsParams {
    pub partition: Option<String>,
}

/// Verify that a job exists, returning the full row.
async fn ensure_job_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Job> {
    JobRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))
}

/// GET /api/v1/jobs?limit=
///
/// List jobs, newest first.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> AppResult<Json<serde_json::Value>> {
    let jobs = JobRepo::list(&state.pool, params.limit).await?;
    Ok(Json(serde_json::json!({ "data": jobs })))
}

/// GET /api/v1/jobs/{id}
///
/// Get a single job by ID.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = ensure_job_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/jobs/{id}/columns
///
/// The column order captured when the job was created.
pub async fn get_job_columns(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let job = ensure_job_exists(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": job.column_order })))
}

/// GET /api/v1/jobs/{id}/logs
///
/// The job's validation log in deterministic `(row_number, id)` replay
/// order.
pub async fn get_job_logs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_job_exists(&state.pool, id).await?;
    let logs = LogRepo::list_by_job(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": logs })))
}

/// GET /api/v1/jobs/{id}/records?partition=
///
/// The job's records in row order, optionally filtered to one partition.
pub async fn get_job_records(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListRecordsParams>,
) -> AppResult<Json<serde_json::Value>> {
    let partition = match params.partition.as_deref() {
        None => None,
        Some(p) => Some(
            Partition::from_str(p)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Invalid partition '{}'. Must be one of: {}",
                        p,
                        Partition::ALL.join(", ")
                    ))
                })?
                .as_str(),
        ),
    };

    ensure_job_exists(&state.pool, id).await?;
    let records = RecordRepo::list_by_job(&state.pool, id, partition).await?;
    Ok(Json(serde_json::json!({ "data": records })))
}

/// POST /api/v1/jobs/{id}/revalidate
///
/// Re-classify every record of the job against the current active rules,
/// rebuilding partitions, log, and counters.
pub async fn revalidate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<JobSummary>>> {
    let summary = revalidate_job(&state.pool, id).await?;

    tracing::info!(
        job_id = id,
        clean_rows = summary.clean_rows,
        quarantined_rows = summary.quarantined_rows,
        "Job revalidated"
    );

    Ok(Json(DataResponse { data: summary }))
}
