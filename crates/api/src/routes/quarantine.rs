//! Route definitions for the `/quarantine` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::quarantine;
use crate::state::AppState;

/// Routes mounted at `/quarantine`.
///
/// ```text
/// GET  /                    -> list_quarantine  (?job_id, ?limit, ?offset)
/// PUT  /{id}                -> correct_record
/// POST /{id}/revalidate     -> revalidate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quarantine::list_quarantine))
        .route("/{id}", put(quarantine::correct_record))
        .route("/{id}/revalidate", post(quarantine::revalidate))
}
