//! Handlers for the `/rules` resource.
//!
//! Validation rules are plain CRUD; batches snapshot them at run time, so
//! edits here never affect an in-flight upload.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use rowsift_core::error::CoreError;
use rowsift_core::rule::{validate_column_name, validate_definition};
use rowsift_core::types::DbId;
use rowsift_db::models::rule::{CreateRule, UpdateRule};
use rowsift_db::repositories::RuleRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for listing rules.
#[derive(Debug, Deserialize)]
pub struct ListRulesParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/v1/rules?include_inactive=
///
/// List rules, newest first. Active only by default.
pub async fn list_rules(
    State(state): State<AppState>,
    Query(params): Query<ListRulesParams>,
) -> AppResult<Json<serde_json::Value>> {
    let rules = RuleRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(serde_json::json!({ "data": rules })))
}

/// POST /api/v1/rules
///
/// Create a new validation rule. Returns the created rule with HTTP 201.
pub async fn create_rule(
    State(state): State<AppState>,
    Json(input): Json<CreateRule>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    validate_column_name(&input.column_name).map_err(AppError::BadRequest)?;
    validate_definition(&input.definition).map_err(AppError::BadRequest)?;

    let rule = RuleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        rule_id = rule.id,
        column_name = %rule.column_name,
        kind = %rule.kind,
        "Validation rule created"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": rule })),
    ))
}

/// PUT /api/v1/rules/{id}
///
/// Update an existing rule. Only provided fields change. Returns 404 if
/// the rule does not exist.
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRule>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(ref column_name) = input.column_name {
        validate_column_name(column_name).map_err(AppError::BadRequest)?;
    }
    if let Some(ref definition) = input.definition {
        validate_definition(definition).map_err(AppError::BadRequest)?;
    }

    let rule = RuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Rule", id }))?;

    tracing::info!(rule_id = rule.id, "Validation rule updated");

    Ok(Json(serde_json::json!({ "data": rule })))
}

/// DELETE /api/v1/rules/{id}
///
/// Delete a rule. Returns 204 on success, 404 if not found.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RuleRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(rule_id = id, "Validation rule deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Rule", id }))
    }
}
