//! Batch processing: one upload → one job, in one transaction.
//!
//! The transaction covers the active-rule snapshot, the job row, every
//! record and log insert, and the final completion update. Any failure
//! rolls the lot back: a partially processed batch is never visible, and
//! no job is ever stranded in `processing`.

use serde::Serialize;
use serde_json::Value;

use rowsift_core::classifier::classify;
use rowsift_core::ingest::RowBatch;
use rowsift_core::job::Partition;
use rowsift_core::ruleset::{group_rules, parse_overrides, resolve};
use rowsift_core::types::DbId;

use rowsift_db::models::job::Job;
use rowsift_db::models::log::CreateLogEntry;
use rowsift_db::models::record::CreateRecord;
use rowsift_db::models::rule::RuleRow;
use rowsift_db::repositories::{JobRepo, LogRepo, RecordRepo, RuleRepo};
use rowsift_db::DbPool;

use crate::error::PipelineError;

/// Per-job summary returned to callers once a batch (or a job
/// revalidation) completes.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job_id: DbId,
    pub total_rows: i32,
    pub clean_rows: i32,
    pub quarantined_rows: i32,
    pub status: String,
}

impl From<Job> for JobSummary {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id,
            total_rows: job.total_rows,
            clean_rows: job.clean_rows,
            quarantined_rows: job.quarantined_rows,
            status: job.status,
        }
    }
}

/// Run a full batch: snapshot rules, classify every row in input order,
/// place each row in its partition, and complete the job.
///
/// Row numbers are the 1-based input positions; every row consumes one
/// number, so a completed job's numbers are exactly `1..=total_rows`.
/// `overrides` is the upload's optional per-column rule override JSON;
/// a malformed payload degrades to the system rules alone.
pub async fn process_batch(
    pool: &DbPool,
    source_name: &str,
    batch: &RowBatch,
    overrides: Option<&Value>,
) -> Result<JobSummary, PipelineError> {
    let mut tx = pool.begin().await?;

    // Point-in-time snapshot: rule edits after this line do not affect
    // this batch.
    let snapshot = RuleRepo::load_active(&mut *tx).await?;
    let system = group_rules(snapshot.iter().map(RuleRow::to_rule));
    let effective = resolve(system, &parse_overrides(overrides));

    let column_order = Value::Array(
        batch
            .columns
            .iter()
            .map(|c| Value::String(c.clone()))
            .collect(),
    );
    let job = JobRepo::create(&mut *tx, source_name, &column_order).await?;

    let mut clean_rows = 0i32;
    let mut quarantined_rows = 0i32;
    let mut log_entries = Vec::new();

    for (index, row) in batch.rows.iter().enumerate() {
        let row_number = (index + 1) as i32;
        let verdict = classify(row, &effective);

        let (partition, error_reason) = if verdict.valid {
            clean_rows += 1;
            log_entries.push(CreateLogEntry::green(job.id, row_number));
            (Partition::Clean, None)
        } else {
            quarantined_rows += 1;
            for failure in &verdict.failures {
                log_entries.push(CreateLogEntry::red(job.id, row_number, failure));
            }
            (Partition::Quarantine, verdict.error_reason())
        };

        RecordRepo::insert(
            &mut *tx,
            &CreateRecord {
                job_id: job.id,
                row_number,
                partition: partition.as_str().to_string(),
                row_data: Value::Object(row.clone()),
                error_reason,
            },
        )
        .await?;
    }

    LogRepo::batch_insert(&mut *tx, &log_entries).await?;

    let total_rows = batch.rows.len() as i32;
    let job = JobRepo::complete(&mut *tx, job.id, total_rows, clean_rows, quarantined_rows).await?;

    tx.commit().await?;

    tracing::info!(
        job_id = job.id,
        total_rows,
        clean_rows,
        quarantined_rows,
        "Batch processed"
    );

    Ok(JobSummary::from(job))
}
