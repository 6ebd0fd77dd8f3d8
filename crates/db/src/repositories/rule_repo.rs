//! Repository for the `rules` table.

use rowsift_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::rule::{CreateRule, RuleRow, UpdateRule};

/// Column list for `rules` queries.
const COLUMNS: &str = "id, column_name, kind, definition, is_active, created_at, updated_at";

/// Provides CRUD operations and batch snapshots for validation rules.
pub struct RuleRepo;

impl RuleRepo {
    /// List rules, newest first. Active rules only unless
    /// `include_inactive` is set.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<RuleRow>, sqlx::Error> {
        let active_clause = if include_inactive {
            ""
        } else {
            "WHERE is_active "
        };
        let query = format!("SELECT {COLUMNS} FROM rules {active_clause}ORDER BY id DESC");
        sqlx::query_as::<_, RuleRow>(&query).fetch_all(pool).await
    }

    /// Snapshot the active rules for a batch or revalidation run.
    ///
    /// Runs on the owning transaction's connection so the snapshot is
    /// consistent with every other read and write of that run.
    pub async fn load_active(conn: &mut PgConnection) -> Result<Vec<RuleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules WHERE is_active ORDER BY id");
        sqlx::query_as::<_, RuleRow>(&query).fetch_all(conn).await
    }

    /// Create a new rule, returning the inserted row.
    pub async fn create(pool: &PgPool, input: &CreateRule) -> Result<RuleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO rules (column_name, kind, definition, is_active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RuleRow>(&query)
            .bind(&input.column_name)
            .bind(&input.kind)
            .bind(&input.definition)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRule,
    ) -> Result<Option<RuleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE rules SET
                column_name = COALESCE($2, column_name),
                kind = COALESCE($3, kind),
                definition = COALESCE($4, definition),
                is_active = COALESCE($5, is_active),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RuleRow>(&query)
            .bind(id)
            .bind(&input.column_name)
            .bind(&input.kind)
            .bind(&input.definition)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
