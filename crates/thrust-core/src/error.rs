//! Error types for the analysis layer.

use thiserror::Error;

/// Errors from run comparison.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriftError {
    /// Drift is relative to a baseline run, so at least two runs are needed.
    #[error("drift comparison needs at least two runs, got {count}")]
    NotEnoughRuns { count: usize },
}

/// Result type for run comparison.
pub type Result<T> = std::result::Result<T, DriftError>;
