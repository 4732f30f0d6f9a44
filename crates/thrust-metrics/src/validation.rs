//! Data quality pre-pass run before every metric.

use thrust_model::{MetricWarning, TimeSeries};

/// Series shorter than this cannot yield any metric.
pub const MIN_POINTS: usize = 2;

/// Sampling is non-uniform when some interval deviates from the mean
/// interval by more than this fraction of it.
const INTERVAL_TOLERANCE: f64 = 0.5;

/// Inspects a series and reports quality problems.
///
/// Only [`MetricWarning::InsufficientData`] stops the caller from computing;
/// every other warning is informational.
pub fn validate_series(series: &TimeSeries) -> Vec<MetricWarning> {
    if series.len() < MIN_POINTS {
        return vec![MetricWarning::InsufficientData];
    }

    let mut warnings = Vec::new();

    if is_non_uniform(series) {
        warnings.push(MetricWarning::NonUniformSampling);
    }

    let missing = series.iter().filter(|p| !p.value.is_finite()).count();
    if missing > 0 {
        warnings.push(MetricWarning::MissingValues { count: missing });
    }

    let negative = series.iter().filter(|p| p.value < 0.0).count();
    if negative > 0 {
        warnings.push(MetricWarning::NegativeValues { count: negative });
    }

    warnings
}

/// True when `series` has enough points for any computation.
pub fn is_sufficient(series: &TimeSeries) -> bool {
    series.len() >= MIN_POINTS
}

fn is_non_uniform(series: &TimeSeries) -> bool {
    let intervals: Vec<f64> = series.pairs().map(|(a, b)| b.time - a.time).collect();
    if intervals.is_empty() {
        return false;
    }
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let max_deviation = intervals
        .iter()
        .map(|interval| (interval - mean).abs())
        .fold(0.0_f64, f64::max);
    max_deviation > mean * INTERVAL_TOLERANCE
}
