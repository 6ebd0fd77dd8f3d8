//! The transactional validation engine.
//!
//! `batch` drives classification over an uploaded row sequence inside a
//! single transaction; `revalidate` re-runs classification for corrected
//! records or whole jobs against the current rule snapshot.

pub mod batch;
pub mod error;
pub mod revalidate;

pub use batch::{process_batch, JobSummary};
pub use error::PipelineError;
pub use revalidate::{revalidate_job, revalidate_record, RevalidationOutcome};
