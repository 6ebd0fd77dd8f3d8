//! Validation log entry model.

use rowsift_core::classifier::RuleFailure;
use rowsift_core::job::StatusColor;
use rowsift_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `validation_logs` table. Immutable once created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LogEntry {
    pub id: DbId,
    pub job_id: DbId,
    pub row_number: i32,
    pub column_name: Option<String>,
    pub original_value: Option<String>,
    pub final_value: Option<String>,
    pub status_color: String,
    pub rule_applied: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a log entry.
#[derive(Debug, Clone)]
pub struct CreateLogEntry {
    pub job_id: DbId,
    pub row_number: i32,
    pub column_name: Option<String>,
    pub original_value: Option<String>,
    pub final_value: Option<String>,
    pub status_color: String,
    pub rule_applied: Option<String>,
}

impl CreateLogEntry {
    /// Green summary entry for a row that passed every applicable rule.
    pub fn green(job_id: DbId, row_number: i32) -> Self {
        Self {
            job_id,
            row_number,
            column_name: None,
            original_value: None,
            final_value: None,
            status_color: StatusColor::Green.as_str().to_string(),
            rule_applied: None,
        }
    }

    /// Red entry for one failing (column, rule) pair.
    pub fn red(job_id: DbId, row_number: i32, failure: &RuleFailure) -> Self {
        Self {
            job_id,
            row_number,
            column_name: Some(failure.column.clone()),
            original_value: Some(failure.value.clone()),
            final_value: None,
            status_color: StatusColor::Red.as_str().to_string(),
            rule_applied: Some(failure.rule_applied()),
        }
    }

    /// Green corrective entry recording a quarantine → clean move.
    pub fn corrective(job_id: DbId, row_number: i32, previous_reason: Option<&str>) -> Self {
        Self {
            job_id,
            row_number,
            column_name: Some("system".to_string()),
            original_value: previous_reason.map(str::to_string),
            final_value: Some("CORRECTED".to_string()),
            status_color: StatusColor::Green.as_str().to_string(),
            rule_applied: Some("revalidation".to_string()),
        }
    }
}
