//! Burn window detection.

use thrust_model::{MetricOptions, MetricWarning, TimeSeries};

use crate::validation::{is_sufficient, validate_series};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurnResult {
    pub burn_duration: Option<f64>,
    pub burn_start_time: Option<f64>,
    pub burn_end_time: Option<f64>,
    pub warnings: Vec<MetricWarning>,
}

/// Burn window: first and last samples at or above `thrust_threshold`.
///
/// A burn shorter than `min_burn_duration` is reported but still returned.
pub fn burn_duration(series: &TimeSeries, options: &MetricOptions) -> BurnResult {
    let mut result = BurnResult {
        warnings: validate_series(series),
        ..BurnResult::default()
    };
    if !is_sufficient(series) {
        return result;
    }

    let threshold = options.thrust_threshold;
    let points = series.points();
    result.burn_start_time = points
        .iter()
        .find(|point| point.value >= threshold)
        .map(|point| point.time);
    result.burn_end_time = points
        .iter()
        .rfind(|point| point.value >= threshold)
        .map(|point| point.time);

    let (Some(start), Some(end)) = (result.burn_start_time, result.burn_end_time) else {
        result.warnings.push(MetricWarning::BurnBoundsNotFound);
        return result;
    };

    let duration = end - start;
    if duration < options.min_burn_duration {
        result.warnings.push(MetricWarning::ShortBurn {
            duration,
            minimum: options.min_burn_duration,
        });
    }
    result.burn_duration = Some(duration);
    result
}
