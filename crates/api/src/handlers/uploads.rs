//! Handlers for the `/uploads` resource.
//!
//! An upload is one batch: rows arrive either pre-parsed (JSON row
//! objects) or as CSV text, are classified against the active rules plus
//! any per-upload overrides, and land in the clean/quarantine partitions
//! under a fresh job.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use rowsift_core::ingest::{parse_csv, RowBatch};
use rowsift_pipeline::{process_batch, JobSummary};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for a pre-parsed row upload.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub source_name: String,
    /// Column order. Defaults to the first row's keys when omitted.
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Map<String, Value>>,
    /// Optional per-column rule overrides for this upload only:
    /// `{ "<column>": { "type": ..., "value": ... } }`.
    pub overrides: Option<Value>,
}

/// Request body for a CSV text upload.
#[derive(Debug, Deserialize)]
pub struct UploadCsvRequest {
    pub source_name: String,
    pub csv_data: String,
    pub overrides: Option<Value>,
}

/// POST /api/v1/uploads
///
/// Classify a batch of pre-parsed rows. Returns the job summary with
/// HTTP 201.
pub async fn upload(
    State(state): State<AppState>,
    Json(body): Json<UploadRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<JobSummary>>)> {
    if body.source_name.is_empty() {
        return Err(AppError::BadRequest(
            "source_name must not be empty".to_string(),
        ));
    }
    if body.rows.is_empty() {
        return Err(AppError::BadRequest(
            "rows array must not be empty".to_string(),
        ));
    }

    let columns = body.columns.unwrap_or_else(|| {
        body.rows[0].keys().cloned().collect()
    });
    let batch = RowBatch {
        columns,
        rows: body.rows,
    };

    let summary =
        process_batch(&state.pool, &body.source_name, &batch, body.overrides.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

/// POST /api/v1/uploads/csv
///
/// Parse CSV text (header row first) and classify its rows. Returns the
/// job summary with HTTP 201.
pub async fn upload_csv(
    State(state): State<AppState>,
    Json(body): Json<UploadCsvRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<JobSummary>>)> {
    if body.source_name.is_empty() {
        return Err(AppError::BadRequest(
            "source_name must not be empty".to_string(),
        ));
    }

    let batch = parse_csv(&body.csv_data)?;
    if batch.rows.is_empty() {
        return Err(AppError::BadRequest(
            "CSV data has no data rows".to_string(),
        ));
    }

    let summary =
        process_batch(&state.pool, &body.source_name, &batch, body.overrides.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}
