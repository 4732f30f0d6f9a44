//! Analysis layer tying ingestion and metric extraction together.
//!
//! [`analyze_file`] runs one file through parsing, role detection, column
//! selection and metric extraction. [`analyze_batch`] does the same for many
//! files while isolating failures, and [`compare_runs`] diffs the metrics of
//! several runs against the first.

pub mod drift;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod selection;

pub use drift::{
    AlignmentMode, DriftEntry, DriftMetric, DriftReport, DriftRun, DriftStatus,
    MetricComparison, STABLE_BAND_PERCENT, align_series, compare_runs,
};
pub use error::{DriftError, Result};
pub use options::AnalysisOptions;
pub use pipeline::{
    BatchResult, FileAnalysis, FileInput, analyze_batch, analyze_file, analyze_paths,
};
pub use selection::{ColumnSelection, Selection, SelectionSource, select_columns};
