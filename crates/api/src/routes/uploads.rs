//! Route definitions for the `/uploads` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /        -> upload       (pre-parsed rows)
/// POST /csv     -> upload_csv   (CSV text)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::upload))
        .route("/csv", post(uploads::upload_csv))
}
