//! HTTP-level integration tests for the `/rules` API endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: CRUD round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_crud_rule(pool: PgPool) {
    // Create a rule.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/rules",
        json!({
            "column_name": "name",
            "kind": "regex",
            "definition": "^[A-Za-z]+$"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let rule_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["is_active"], true);

    // List includes it.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/rules").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Update the definition.
    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/rules/{rule_id}"),
        json!({"definition": "^[A-Za-z ]+$"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["definition"], "^[A-Za-z ]+$");

    // Delete the rule.
    let app = build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/rules/{rule_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Delete again: gone.
    let app = build_test_app(pool);
    let response = delete(app, &format!("/api/v1/rules/{rule_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: validation failures return 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rule_empty_column_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/rules",
        json!({
            "column_name": "",
            "kind": "regex",
            "definition": "^x$"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rule_empty_definition_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/rules",
        json!({
            "column_name": "name",
            "kind": "regex",
            "definition": ""
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: inactive rules are hidden unless asked for
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_rules_hidden_by_default(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/rules",
        json!({
            "column_name": "age",
            "kind": "range",
            "definition": "0-120"
        }),
    )
    .await;
    let json = body_json(response).await;
    let rule_id = json["data"]["id"].as_i64().unwrap();

    // Deactivate.
    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/rules/{rule_id}"),
        json!({"is_active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Default list is empty.
    let app = build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/rules").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // include_inactive surfaces it again.
    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/rules?include_inactive=true").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["is_active"], false);
}

// ---------------------------------------------------------------------------
// Test: update of a missing rule returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_rule_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/rules/99999",
        json!({"definition": "0-1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
