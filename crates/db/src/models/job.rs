//! Batch job model.

use rowsift_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: DbId,
    pub source_name: String,
    pub status: String,
    /// The batch's column list, in upload order (JSONB array of strings).
    pub column_order: serde_json::Value,
    pub total_rows: i32,
    pub clean_rows: i32,
    pub quarantined_rows: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
