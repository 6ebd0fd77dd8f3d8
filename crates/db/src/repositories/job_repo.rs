//! Repository for the `jobs` table.

use rowsift_core::job::JobStatus;
use rowsift_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::job::Job;

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, source_name, status, column_order, total_rows, \
    clean_rows, quarantined_rows, created_at, updated_at";

/// Provides lifecycle operations for batch jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job in `processing` status, capturing the batch's
    /// column order. Runs on the batch transaction.
    pub async fn create(
        conn: &mut PgConnection,
        source_name: &str,
        column_order: &serde_json::Value,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (source_name, column_order)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(source_name)
            .bind(column_order)
            .fetch_one(conn)
            .await
    }

    /// Mark a job completed with its final counters. Runs on the owning
    /// transaction.
    pub async fn complete(
        conn: &mut PgConnection,
        id: DbId,
        total_rows: i32,
        clean_rows: i32,
        quarantined_rows: i32,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                status = $5,
                total_rows = $2,
                clean_rows = $3,
                quarantined_rows = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(total_rows)
            .bind(clean_rows)
            .bind(quarantined_rows)
            .bind(JobStatus::Completed.as_str())
            .fetch_one(conn)
            .await
    }

    /// Find a job by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Row-lock a job for the duration of the surrounding transaction.
    ///
    /// Serializes concurrent revalidation runs targeting the same job;
    /// runs on different jobs never contend.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List jobs, newest first.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Job>, sqlx::Error> {
        let limit = limit.unwrap_or(100).clamp(1, 500);
        let query = format!(
            "SELECT {COLUMNS} FROM jobs
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
