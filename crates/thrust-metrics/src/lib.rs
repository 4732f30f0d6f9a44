//! Propulsion metric extraction.
//!
//! Every computation takes a [`TimeSeries`](thrust_model::TimeSeries), runs the
//! shared validation pre-pass, and returns its own result with warnings. None
//! of them fail: undeterminable values come back as `None`.
//! [`MetricExtractor::extract_all`] runs all four and merges their warnings.

pub mod burn;
pub mod error;
pub mod extractor;
pub mod impulse;
pub mod peak;
pub mod rise;
pub mod series;
pub mod validation;

pub use burn::{BurnResult, burn_duration};
pub use error::{MetricsError, Result};
pub use extractor::MetricExtractor;
pub use impulse::{ImpulseResult, area_under_curve, trapezoid_area};
pub use peak::{PeakResult, find_peak, peak_thrust};
pub use rise::{RiseTimeResult, crossing_time, rise_time};
pub use series::{cell_to_f64, prepare_time_series};
pub use validation::validate_series;

use thrust_model::{MetricOptions, PropulsionMetrics, RawDataset};

/// Extracts metrics for one (dataset, time column, thrust column) triple.
pub fn extract_metrics_from_dataset(
    dataset: &RawDataset,
    time_column: &str,
    thrust_column: &str,
    options: MetricOptions,
) -> Result<PropulsionMetrics> {
    MetricExtractor::new(options).extract_from_dataset(dataset, time_column, thrust_column)
}
