//! Revalidation: re-running classification against the current rules.
//!
//! Two granularities: a single quarantined record (after a correction, or
//! after rules were loosened), or an entire job. Both run under their own
//! transaction with a row lock on the target, so concurrent calls against
//! the same record or job serialize instead of interleaving.

use rowsift_core::classifier::classify;
use rowsift_core::error::CoreError;
use rowsift_core::job::Partition;
use rowsift_core::ruleset::group_rules;
use rowsift_core::types::DbId;

use rowsift_db::models::log::CreateLogEntry;
use rowsift_db::models::rule::RuleRow;
use rowsift_db::repositories::{JobRepo, LogRepo, RecordRepo, RuleRepo};
use rowsift_db::DbPool;

use crate::batch::JobSummary;
use crate::error::PipelineError;

/// Outcome of revalidating a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum RevalidationOutcome {
    /// The record is in the clean partition: either it just moved, or it
    /// was already there (repeat calls are a no-op).
    Clean,
    /// The record stays quarantined; the remaining failure reasons.
    StillInvalid(Vec<String>),
}

/// Re-classify one quarantined record against the current active rules
/// (system rules only; per-upload overrides do not outlive their batch).
///
/// A record that passes moves to the clean partition and gains one green
/// corrective log entry. A record that still fails is left untouched.
/// A record already in the clean partition returns [`RevalidationOutcome::Clean`]
/// without writing anything.
pub async fn revalidate_record(
    pool: &DbPool,
    record_id: DbId,
) -> Result<RevalidationOutcome, PipelineError> {
    let mut tx = pool.begin().await?;

    let record = RecordRepo::find_for_update(&mut *tx, record_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Record",
            id: record_id,
        })?;

    if record.partition == Partition::Clean.as_str() {
        return Ok(RevalidationOutcome::Clean);
    }

    let snapshot = RuleRepo::load_active(&mut *tx).await?;
    let effective = group_rules(snapshot.iter().map(RuleRow::to_rule));

    let row = record.row_data.as_object().cloned().unwrap_or_default();
    let verdict = classify(&row, &effective);

    if !verdict.valid {
        // Still failing: leave the record where it is.
        return Ok(RevalidationOutcome::StillInvalid(verdict.failure_reasons()));
    }

    RecordRepo::set_partition(&mut *tx, record.id, Partition::Clean.as_str(), None).await?;
    LogRepo::insert(
        &mut *tx,
        &CreateLogEntry::corrective(record.job_id, record.row_number, record.error_reason.as_deref()),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        record_id,
        job_id = record.job_id,
        row_number = record.row_number,
        "Quarantined record revalidated clean"
    );

    Ok(RevalidationOutcome::Clean)
}

/// Re-classify every record of a job (clean and quarantined) against
/// the current active rules, rebuilding the job's partitions, log, and
/// counters from scratch in one pass.
///
/// The job row is locked `FOR UPDATE` for the whole transaction, so two
/// rebuilds of the same job cannot interleave.
pub async fn revalidate_job(pool: &DbPool, job_id: DbId) -> Result<JobSummary, PipelineError> {
    let mut tx = pool.begin().await?;

    JobRepo::find_for_update(&mut *tx, job_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        })?;

    let snapshot = RuleRepo::load_active(&mut *tx).await?;
    let effective = group_rules(snapshot.iter().map(RuleRow::to_rule));

    // The old log describes placements that are about to be recomputed.
    LogRepo::delete_by_job(&mut *tx, job_id).await?;

    let records = RecordRepo::list_by_job(&mut *tx, job_id, None).await?;

    let mut clean_rows = 0i32;
    let mut quarantined_rows = 0i32;
    let mut log_entries = Vec::new();

    for record in &records {
        let row = record.row_data.as_object().cloned().unwrap_or_default();
        let verdict = classify(&row, &effective);

        let (partition, error_reason) = if verdict.valid {
            clean_rows += 1;
            log_entries.push(CreateLogEntry::green(job_id, record.row_number));
            (Partition::Clean, None)
        } else {
            quarantined_rows += 1;
            for failure in &verdict.failures {
                log_entries.push(CreateLogEntry::red(job_id, record.row_number, failure));
            }
            (Partition::Quarantine, verdict.error_reason())
        };

        RecordRepo::set_partition(&mut *tx, record.id, partition.as_str(), error_reason.as_deref())
            .await?;
    }

    LogRepo::batch_insert(&mut *tx, &log_entries).await?;

    let job = JobRepo::complete(
        &mut *tx,
        job_id,
        records.len() as i32,
        clean_rows,
        quarantined_rows,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        job_id,
        total_rows = records.len(),
        clean_rows,
        quarantined_rows,
        "Job revalidated"
    );

    Ok(JobSummary::from(job))
}
