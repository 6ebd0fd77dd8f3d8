//! Classified record model.

use rowsift_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `records` table: one uploaded row, placed in the clean
/// or quarantine partition with its full field mapping as JSONB.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Record {
    pub id: DbId,
    pub job_id: DbId,
    pub row_number: i32,
    pub partition: String,
    pub row_data: serde_json::Value,
    /// `"; "`-joined failure reasons; NULL for clean records.
    pub error_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a classified record during batch processing.
#[derive(Debug, Clone)]
pub struct CreateRecord {
    pub job_id: DbId,
    pub row_number: i32,
    pub partition: String,
    pub row_data: serde_json::Value,
    pub error_reason: Option<String>,
}

/// DTO for correcting a quarantined record's fields before revalidation.
///
/// `fields` is merged into the stored row data; unmentioned columns keep
/// their values.
#[derive(Debug, Deserialize)]
pub struct CorrectRecord {
    pub fields: serde_json::Map<String, serde_json::Value>,
}
