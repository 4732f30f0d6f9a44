//! Propulsion metrics and the warnings attached to them.

use std::fmt;

use serde::Serialize;

/// Non-fatal condition found while computing metrics.
///
/// Warnings never abort extraction; the affected metric degrades to `None`
/// (or is returned as-is) and the warning travels with the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum MetricWarning {
    InsufficientData,
    NonUniformSampling,
    MissingValues { count: usize },
    NegativeValues { count: usize },
    NoValidValues,
    PeakBelowThreshold,
    RiseBoundariesNotFound,
    NonPositiveRiseTime,
    BurnBoundsNotFound,
    ShortBurn { duration: f64, minimum: f64 },
    NegativeImpulse,
}

impl fmt::Display for MetricWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricWarning::InsufficientData => {
                f.write_str("Insufficient data points for metric calculation")
            }
            MetricWarning::NonUniformSampling => {
                f.write_str("Non-uniform time sampling detected - results may be less accurate")
            }
            MetricWarning::MissingValues { count } => {
                write!(f, "{count} missing or invalid data points detected")
            }
            MetricWarning::NegativeValues { count } => {
                write!(f, "{count} negative thrust values detected")
            }
            MetricWarning::NoValidValues => f.write_str("No valid thrust values found"),
            MetricWarning::PeakBelowThreshold => {
                f.write_str("Peak thrust below threshold - rise time calculation skipped")
            }
            MetricWarning::RiseBoundariesNotFound => {
                f.write_str("Could not find rise time boundaries")
            }
            MetricWarning::NonPositiveRiseTime => {
                f.write_str("Invalid rise time calculation (negative or zero duration)")
            }
            MetricWarning::BurnBoundsNotFound => {
                f.write_str("Could not determine burn start/end times")
            }
            MetricWarning::ShortBurn { duration, minimum } => write!(
                f,
                "Burn duration ({duration:.3}s) below minimum threshold ({minimum}s)"
            ),
            MetricWarning::NegativeImpulse => {
                f.write_str("Negative area under curve - check for data quality issues")
            }
        }
    }
}

impl From<MetricWarning> for String {
    fn from(warning: MetricWarning) -> Self {
        warning.to_string()
    }
}

/// Appends `warnings` to `target`, skipping any already present.
pub fn merge_warnings(
    target: &mut Vec<MetricWarning>,
    warnings: impl IntoIterator<Item = MetricWarning>,
) {
    for warning in warnings {
        if !target.contains(&warning) {
            target.push(warning);
        }
    }
}

/// Metrics extracted from one (file, time column, value column) triple.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropulsionMetrics {
    pub rise_time: Option<f64>,
    pub peak_thrust: Option<f64>,
    pub peak_thrust_time: Option<f64>,
    pub burn_duration: Option<f64>,
    pub burn_start_time: Option<f64>,
    pub burn_end_time: Option<f64>,
    /// Total impulse by trapezoidal integration.
    pub area_under_curve: Option<f64>,
    /// De-duplicated union of every sub-computation's warnings.
    pub warnings: Vec<MetricWarning>,
}

impl PropulsionMetrics {
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn has_warning(&self, warning: &MetricWarning) -> bool {
        self.warnings.contains(warning)
    }
}
