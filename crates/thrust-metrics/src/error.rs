//! Error types for metric extraction.

use thiserror::Error;

/// Errors raised before any metric can be computed.
///
/// Data quality problems are not errors; they are reported as
/// [`thrust_model::MetricWarning`] on the result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// Requested column does not exist in the dataset.
    #[error("column '{column}' not found")]
    UnknownColumn { column: String },
}

/// Result type for metric extraction.
pub type Result<T> = std::result::Result<T, MetricsError>;
