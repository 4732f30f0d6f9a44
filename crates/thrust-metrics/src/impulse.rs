//! Total impulse by trapezoidal integration.

use thrust_model::{MetricWarning, TimeSeries};

use crate::validation::{is_sufficient, validate_series};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpulseResult {
    pub area_under_curve: Option<f64>,
    pub warnings: Vec<MetricWarning>,
}

/// Trapezoidal area over consecutive pairs. Pairs with a missing value
/// contribute nothing.
pub fn trapezoid_area(series: &TimeSeries) -> f64 {
    series
        .pairs()
        .filter(|(a, b)| a.value.is_finite() && b.value.is_finite())
        .map(|(a, b)| (a.value + b.value) / 2.0 * (b.time - a.time))
        .sum()
}

pub fn area_under_curve(series: &TimeSeries) -> ImpulseResult {
    let mut result = ImpulseResult {
        warnings: validate_series(series),
        ..ImpulseResult::default()
    };
    if !is_sufficient(series) {
        return result;
    }

    let area = trapezoid_area(series);
    if area < 0.0 {
        result.warnings.push(MetricWarning::NegativeImpulse);
    }
    result.area_under_curve = Some(area);
    result
}
