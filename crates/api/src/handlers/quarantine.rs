//! Handlers for the `/quarantine` resource: listing quarantined records,
//! correcting their fields, and revalidating a single record.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use rowsift_core::error::CoreError;
use rowsift_core::job::Partition;
use rowsift_core::types::DbId;
use rowsift_db::models::record::CorrectRecord;
use rowsift_db::repositories::RecordRepo;
use rowsift_pipeline::{revalidate_record, RevalidationOutcome};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing quarantined records.
#[derive(Debug, Deserialize)]
pub struct ListQuarantineParams {
    pub job_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for the record revalidation endpoint.
#[derive(Debug, Serialize)]
pub struct RevalidationResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// GET /api/v1/quarantine?job_id=&limit=&offset=
///
/// List quarantined records, newest first.
pub async fn list_quarantine(
    State(state): State<AppState>,
    Query(params): Query<ListQuarantineParams>,
) -> AppResult<Json<serde_json::Value>> {
    let records =
        RecordRepo::list_quarantined(&state.pool, params.job_id, params.limit, params.offset)
            .await?;
    Ok(Json(serde_json::json!({ "data": records })))
}

/// PUT /api/v1/quarantine/{id}
///
/// Merge corrected field values into a quarantined record ahead of
/// revalidation. Clean records are not editable (409).
pub async fn correct_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CorrectRecord>,
) -> AppResult<Json<serde_json::Value>> {
    if input.fields.is_empty() {
        return Err(AppError::BadRequest(
            "fields object must not be empty".to_string(),
        ));
    }

    let record = RecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Record",
            id,
        }))?;
    if record.partition != Partition::Quarantine.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only quarantined records can be corrected".to_string(),
        )));
    }

    let updated = RecordRepo::merge_fields(&state.pool, id, &input.fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Record",
            id,
        }))?;

    tracing::info!(
        record_id = id,
        job_id = updated.job_id,
        fields = input.fields.len(),
        "Quarantined record corrected"
    );

    Ok(Json(serde_json::json!({ "data": updated })))
}

/// POST /api/v1/quarantine/{id}/revalidate
///
/// Re-check one record against the current active rules. A passing record
/// moves to the clean partition; a failing one reports its remaining
/// reasons. Safe to repeat on an already-clean record.
pub async fn revalidate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RevalidationResponse>>> {
    let outcome = revalidate_record(&state.pool, id).await?;

    let response = match outcome {
        RevalidationOutcome::Clean => RevalidationResponse {
            status: "success",
            errors: Vec::new(),
        },
        RevalidationOutcome::StillInvalid(errors) => RevalidationResponse {
            status: "invalid",
            errors,
        },
    };

    Ok(Json(DataResponse { data: response }))
}
