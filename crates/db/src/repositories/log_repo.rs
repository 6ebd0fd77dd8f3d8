//! Repository for the `validation_logs` table.

use rowsift_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::log::{CreateLogEntry, LogEntry};

/// Column list for `validation_logs` SELECT queries.
const COLUMNS: &str = "id, job_id, row_number, column_name, original_value, \
    final_value, status_color, rule_applied, created_at";

/// Column list for INSERT (excludes auto-generated `id`, `created_at`).
const INSERT_COLUMNS: &str = "job_id, row_number, column_name, original_value, \
    final_value, status_color, rule_applied";

/// Number of bind parameters per inserted entry.
const INSERT_PARAMS: usize = 7;

/// Entries per multi-row INSERT statement.
const INSERT_CHUNK: usize = 1000;

/// Provides insert and replay operations for validation log entries.
pub struct LogRepo;

impl LogRepo {
    /// Insert a single log entry. Runs on the owning transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        entry: &CreateLogEntry,
    ) -> Result<LogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO validation_logs ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LogEntry>(&query)
            .bind(entry.job_id)
            .bind(entry.row_number)
            .bind(&entry.column_name)
            .bind(&entry.original_value)
            .bind(&entry.final_value)
            .bind(&entry.status_color)
            .bind(&entry.rule_applied)
            .fetch_one(conn)
            .await
    }

    /// Batch insert log entries in slice order.
    ///
    /// Multi-row INSERTs of at most [`INSERT_CHUNK`] entries keep each
    /// statement under PostgreSQL's bind-parameter limit; ids are assigned
    /// sequentially, so the `(row_number, id)` replay order reflects slice
    /// order.
    pub async fn batch_insert(
        conn: &mut PgConnection,
        entries: &[CreateLogEntry],
    ) -> Result<(), sqlx::Error> {
        for chunk in entries.chunks(INSERT_CHUNK) {
            Self::insert_chunk(conn, chunk).await?;
        }
        Ok(())
    }

    async fn insert_chunk(
        conn: &mut PgConnection,
        entries: &[CreateLogEntry],
    ) -> Result<(), sqlx::Error> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut query = format!("INSERT INTO validation_logs ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1usize;
        let mut first = true;

        for _ in entries {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..INSERT_PARAMS {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        let mut q = sqlx::query(&query);
        for entry in entries {
            q = q
                .bind(entry.job_id)
                .bind(entry.row_number)
                .bind(&entry.column_name)
                .bind(&entry.original_value)
                .bind(&entry.final_value)
                .bind(&entry.status_color)
                .bind(&entry.rule_applied);
        }

        q.execute(conn).await?;
        Ok(())
    }

    /// A job's full log in deterministic replay order.
    pub async fn list_by_job(pool: &PgPool, job_id: DbId) -> Result<Vec<LogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validation_logs
             WHERE job_id = $1
             ORDER BY row_number, id"
        );
        sqlx::query_as::<_, LogEntry>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a job's log ahead of a full rebuild. Runs on the rebuild
    /// transaction. Returns the number of entries removed.
    pub async fn delete_by_job(
        conn: &mut PgConnection,
        job_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM validation_logs WHERE job_id = $1")
            .bind(job_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
