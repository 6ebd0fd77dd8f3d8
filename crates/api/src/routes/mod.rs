pub mod health;
pub mod jobs;
pub mod quarantine;
pub mod rules;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rules                         list, create
/// /rules/{id}                    update, delete
///
/// /uploads                       classify pre-parsed rows (POST)
/// /uploads/csv                   classify CSV text (POST)
///
/// /jobs                          list
/// /jobs/{id}                     summary
/// /jobs/{id}/columns             captured column order
/// /jobs/{id}/logs                validation log, replay order
/// /jobs/{id}/records             records (?partition=clean|quarantine)
/// /jobs/{id}/revalidate          full-job rebuild (POST)
///
/// /quarantine                    list quarantined records
/// /quarantine/{id}               correct fields (PUT)
/// /quarantine/{id}/revalidate    re-check one record (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/rules", rules::router())
        .nest("/uploads", uploads::router())
        .nest("/jobs", jobs::router())
        .nest("/quarantine", quarantine::router())
}
