//! HTTP-level integration tests for the `/uploads` API endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

/// Seed the standard name/age rule pair through the API.
async fn seed_rules(pool: &PgPool) {
    for rule in [
        json!({"column_name": "name", "kind": "regex", "definition": "^[A-Za-z]+$"}),
        json!({"column_name": "age", "kind": "range", "definition": "0-120"}),
    ] {
        let app = build_test_app(pool.clone());
        let response = post_json(app, "/api/v1/rules", rule).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/uploads classifies pre-parsed rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rows(pool: PgPool) {
    seed_rules(&pool).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "people.csv",
            "columns": ["name", "age"],
            "rows": [
                {"name": "John", "age": "25"},
                {"name": "Bob123", "age": "35"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_rows"], 2);
    assert_eq!(json["data"]["clean_rows"], 1);
    assert_eq!(json["data"]["quarantined_rows"], 1);
    assert_eq!(json["data"]["status"], "completed");

    // The quarantined record carries its failure reason.
    let job_id = json["data"]["job_id"].as_i64().unwrap();
    let app = build_test_app(pool);
    let json = body_json(
        get(
            app,
            &format!("/api/v1/jobs/{job_id}/records?partition=quarantine"),
        )
        .await,
    )
    .await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["row_number"], 2);
    assert_eq!(records[0]["error_reason"], "Column 'name' failed regex rule");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_empty_rows_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "empty.csv",
            "rows": []
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_empty_source_name_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "",
            "rows": [{"name": "John"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/uploads/csv parses and classifies CSV text
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_csv(pool: PgPool) {
    seed_rules(&pool).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/uploads/csv",
        json!({
            "source_name": "people.csv",
            "csv_data": "name,age\nJohn,25\nBob123,35\nJane,999\n"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_rows"], 3);
    assert_eq!(json["data"]["clean_rows"], 1);
    assert_eq!(json["data"]["quarantined_rows"], 2);

    // Captured column order matches the CSV header.
    let job_id = json["data"]["job_id"].as_i64().unwrap();
    let app = build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/jobs/{job_id}/columns")).await).await;
    assert_eq!(json["data"], json!(["name", "age"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_csv_without_header_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads/csv",
        json!({
            "source_name": "broken.csv",
            "csv_data": ""
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_csv_header_only_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads/csv",
        json!({
            "source_name": "header-only.csv",
            "csv_data": "name,age\n"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: per-upload overrides replace system rules for one batch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_with_override(pool: PgPool) {
    seed_rules(&pool).await;

    // Tighter age range for this upload only.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "minors.csv",
            "rows": [{"age": "25"}],
            "overrides": {"age": {"type": "range", "value": "0-18"}}
        }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["quarantined_rows"], 1);

    // The system rule is unchanged for the next upload.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "adults.csv",
            "rows": [{"age": "25"}]
        }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["clean_rows"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_with_malformed_override_falls_back(pool: PgPool) {
    seed_rules(&pool).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/uploads",
        json!({
            "source_name": "bad-overrides.csv",
            "rows": [{"age": "25"}],
            "overrides": ["not", "an", "object"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["clean_rows"], 1);
}
