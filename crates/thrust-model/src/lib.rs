//! Shared data model for propulsion test analysis.
//!
//! Everything here is plain data: parsed datasets, column roles, time series,
//! extraction options, and the metrics produced from them. Parsing lives in
//! `thrust-ingest`, computation in `thrust-metrics`.

pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod options;
pub mod roles;
pub mod series;

pub use dataset::{CellValue, ColumnType, RawDataset, TypeInference};
pub use diagnostics::Diagnostics;
pub use error::OptionsError;
pub use metrics::{MetricWarning, PropulsionMetrics, merge_warnings};
pub use options::MetricOptions;
pub use roles::{ColumnRole, ColumnRoleMap};
pub use series::{TimeSeries, TimeSeriesPoint};
