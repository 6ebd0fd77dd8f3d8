//! Repository for the `records` table.

use rowsift_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::record::{CreateRecord, Record};

/// Column list for `records` queries.
const COLUMNS: &str = "id, job_id, row_number, partition, row_data, \
    error_reason, created_at, updated_at";

/// Provides placement and lookup operations for classified records.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a classified record. Runs on the batch transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateRecord,
    ) -> Result<Record, sqlx::Error> {
        let query = format!(
            "INSERT INTO records (job_id, row_number, partition, row_data, error_reason)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(input.job_id)
            .bind(input.row_number)
            .bind(&input.partition)
            .bind(&input.row_data)
            .bind(&input.error_reason)
            .fetch_one(conn)
            .await
    }

    /// Find a record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records WHERE id = $1");
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Row-lock a record for the duration of the surrounding transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List a job's records in row order, optionally filtered to one
    /// partition. Accepts any executor: handlers read through the pool,
    /// job revalidation reads on its own transaction.
    pub async fn list_by_job<'e>(
        executor: impl PgExecutor<'e>,
        job_id: DbId,
        partition: Option<&str>,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM records
             WHERE job_id = $1 AND ($2::TEXT IS NULL OR partition = $2)
             ORDER BY row_number"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(job_id)
            .bind(partition)
            .fetch_all(executor)
            .await
    }

    /// List quarantined records, newest first, optionally scoped to a job.
    pub async fn list_quarantined(
        pool: &PgPool,
        job_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let limit = limit.unwrap_or(50).clamp(1, 500);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM records
             WHERE partition = 'quarantine' AND ($1::BIGINT IS NULL OR job_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(job_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move a record to a partition, replacing its error reason. Runs on
    /// the owning transaction.
    pub async fn set_partition(
        conn: &mut PgConnection,
        id: DbId,
        partition: &str,
        error_reason: Option<&str>,
    ) -> Result<Record, sqlx::Error> {
        let query = format!(
            "UPDATE records SET
                partition = $2,
                error_reason = $3,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .bind(partition)
            .bind(error_reason)
            .fetch_one(conn)
            .await
    }

    /// Merge corrected fields into a quarantined record's row data.
    ///
    /// Restricted to the quarantine partition -- clean records are not
    /// editable. Returns `None` when the record is missing or clean.
    pub async fn merge_fields(
        pool: &PgPool,
        id: DbId,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!(
            "UPDATE records SET
                row_data = row_data || $2,
                updated_at = now()
             WHERE id = $1 AND partition = 'quarantine'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .bind(serde_json::Value::Object(fields.clone()))
            .fetch_optional(pool)
            .await
    }
}
