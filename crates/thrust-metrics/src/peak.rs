//! Peak detection.

use thrust_model::{MetricWarning, TimeSeries, TimeSeriesPoint};

use crate::validation::{is_sufficient, validate_series};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakResult {
    pub peak_thrust: Option<f64>,
    pub peak_thrust_time: Option<f64>,
    pub warnings: Vec<MetricWarning>,
}

/// Largest value and the time it first occurs. NaN values are skipped.
pub fn find_peak(series: &TimeSeries) -> Option<&TimeSeriesPoint> {
    series
        .iter()
        .filter(|point| !point.value.is_nan())
        .fold(None, |best: Option<&TimeSeriesPoint>, point| match best {
            Some(current) if current.value >= point.value => Some(current),
            _ => Some(point),
        })
}

pub fn peak_thrust(series: &TimeSeries) -> PeakResult {
    let mut result = PeakResult {
        warnings: validate_series(series),
        ..PeakResult::default()
    };
    if !is_sufficient(series) {
        return result;
    }

    match find_peak(series) {
        Some(peak) => {
            result.peak_thrust = Some(peak.value);
            result.peak_thrust_time = Some(peak.time);
        }
        None => result.warnings.push(MetricWarning::NoValidValues),
    }
    result
}
