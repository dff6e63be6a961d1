//! Tracker error types.

use crate::db::DbError;
use study_core::CycleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("transition refused: {0}")]
    Cycle(#[from] CycleError),

    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
