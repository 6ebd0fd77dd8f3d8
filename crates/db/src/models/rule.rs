//! Validation rule model.

use rowsift_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rules` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RuleRow {
    pub id: DbId,
    pub column_name: String,
    pub kind: String,
    pub definition: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RuleRow {
    /// Project into the evaluation-facing rule shape.
    pub fn to_rule(&self) -> rowsift_core::rule::Rule {
        rowsift_core::rule::Rule {
            column_name: self.column_name.clone(),
            kind: rowsift_core::rule::RuleKind::parse(&self.kind),
            definition: self.definition.clone(),
        }
    }
}

/// DTO for creating a new rule.
#[derive(Debug, Deserialize)]
pub struct CreateRule {
    pub column_name: String,
    pub kind: String,
    pub definition: String,
    pub is_active: Option<bool>,
}

/// DTO for updating a rule. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateRule {
    pub column_name: Option<String>,
    pub kind: Option<String>,
    pub definition: Option<String>,
    pub is_active: Option<bool>,
}
