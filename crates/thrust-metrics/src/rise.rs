//! Rise time between two fractions of peak thrust.

use thrust_model::{MetricOptions, MetricWarning, TimeSeries};

use crate::peak::find_peak;
use crate::validation::{is_sufficient, validate_series};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiseTimeResult {
    pub rise_time: Option<f64>,
    /// Interpolated crossing of `peak × rise_time_start`.
    pub start_time: Option<f64>,
    /// Interpolated crossing of `peak × rise_time_end`.
    pub end_time: Option<f64>,
    pub warnings: Vec<MetricWarning>,
}

/// Time at which the series first crosses `threshold`.
///
/// Scans consecutive pairs in time order and interpolates linearly inside the
/// first pair that brackets the threshold in either direction. On noisy
/// ignition curves this is the earliest crossing, not necessarily the last.
pub fn crossing_time(series: &TimeSeries, threshold: f64) -> Option<f64> {
    series.pairs().find_map(|(a, b)| {
        let rising = a.value <= threshold && b.value >= threshold;
        let falling = a.value >= threshold && b.value <= threshold;
        if !(rising || falling) {
            return None;
        }
        if b.value == a.value {
            return Some(a.time);
        }
        Some(a.time + (threshold - a.value) / (b.value - a.value) * (b.time - a.time))
    })
}

pub fn rise_time(series: &TimeSeries, options: &MetricOptions) -> RiseTimeResult {
    let mut result = RiseTimeResult {
        warnings: validate_series(series),
        ..RiseTimeResult::default()
    };
    if !is_sufficient(series) {
        return result;
    }

    let peak = match find_peak(series) {
        Some(peak) if peak.value > options.thrust_threshold => peak.value,
        _ => {
            result.warnings.push(MetricWarning::PeakBelowThreshold);
            return result;
        }
    };

    result.start_time = crossing_time(series, peak * options.rise_time_start);
    result.end_time = crossing_time(series, peak * options.rise_time_end);

    let (Some(start), Some(end)) = (result.start_time, result.end_time) else {
        result.warnings.push(MetricWarning::RiseBoundariesNotFound);
        return result;
    };

    let rise = end - start;
    if rise > 0.0 {
        result.rise_time = Some(rise);
    } else {
        result.warnings.push(MetricWarning::NonPositiveRiseTime);
    }
    result
}
