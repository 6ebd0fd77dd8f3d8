//! Route definitions for the `/rules` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::rules;
use crate::state::AppState;

/// Routes mounted at `/rules`.
///
/// ```text
/// GET    /        -> list_rules   (?include_inactive)
/// POST   /        -> create_rule
/// PUT    /{id}    -> update_rule
/// DELETE /{id}    -> delete_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rules::list_rules).post(rules::create_rule))
        .route("/{id}", put(rules::update_rule).delete(rules::delete_rule))
}
