use rowsift_core::error::CoreError;

/// Errors surfaced by batch processing and revalidation.
///
/// Classification outcomes are never errors: an invalid row is data.
/// Only missing targets and storage failures reach this type; a storage
/// failure mid-run rolls the whole transaction back.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
