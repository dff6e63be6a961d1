//! Error types for study-core.

use thiserror::Error;

/// Result type alias using CycleError.
pub type Result<T> = std::result::Result<T, CycleError>;

/// Transitions the state machine refuses to perform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("study cycle must contain at least one block")]
    EmptyCycle,

    #[error("current block index {index} is out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}
