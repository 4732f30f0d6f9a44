use thiserror::Error;

/// Invalid [`MetricOptions`](crate::MetricOptions).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be a fraction in (0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("riseTimeStart ({start}) must be below riseTimeEnd ({end})")]
    InvertedRiseWindow { start: f64, end: f64 },
    #[error("minBurnDuration must not be negative, got {value}")]
    NegativeDuration { value: f64 },
}
