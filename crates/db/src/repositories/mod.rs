//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Pool-facing reads accept `&PgPool` (or any `PgExecutor` when the same
//! query also runs inside a transaction); writes that must join a batch
//! or revalidation transaction accept `&mut PgConnection` so one
//! transaction can span several repositories.

pub mod job_repo;
pub mod log_repo;
pub mod record_repo;
pub mod rule_repo;

pub use job_repo::JobRepo;
pub use log_repo::LogRepo;
pub use record_repo::RecordRepo;
pub use rule_repo::RuleRepo;
