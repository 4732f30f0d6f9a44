//! Configuration for metric extraction.

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Thresholds used by the metric extractor.
///
/// Always passed explicitly; there is no process-wide default instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricOptions {
    /// Minimum value considered active burn, in the units of the input.
    pub thrust_threshold: f64,
    /// Fraction of peak where the rise starts.
    pub rise_time_start: f64,
    /// Fraction of peak where the rise ends.
    pub rise_time_end: f64,
    /// Burns shorter than this (time units) are flagged, not rejected.
    pub min_burn_duration: f64,
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            thrust_threshold: 1.0,
            rise_time_start: 0.1,
            rise_time_end: 0.9,
            min_burn_duration: 0.1,
        }
    }
}

impl MetricOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thrust_threshold(mut self, threshold: f64) -> Self {
        self.thrust_threshold = threshold;
        self
    }

    pub fn with_rise_window(mut self, start: f64, end: f64) -> Self {
        self.rise_time_start = start;
        self.rise_time_end = end;
        self
    }

    pub fn with_min_burn_duration(mut self, duration: f64) -> Self {
        self.min_burn_duration = duration;
        self
    }

    /// Checks that every field is usable by the extractor.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let fields = [
            ("thrustThreshold", self.thrust_threshold),
            ("riseTimeStart", self.rise_time_start),
            ("riseTimeEnd", self.rise_time_end),
            ("minBurnDuration", self.min_burn_duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(OptionsError::NotFinite { field: name });
            }
        }
        for (name, value) in [
            ("riseTimeStart", self.rise_time_start),
            ("riseTimeEnd", self.rise_time_end),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(OptionsError::FractionOutOfRange { field: name, value });
            }
        }
        if self.rise_time_start >= self.rise_time_end {
            return Err(OptionsError::InvertedRiseWindow {
                start: self.rise_time_start,
                end: self.rise_time_end,
            });
        }
        if self.min_burn_duration < 0.0 {
            return Err(OptionsError::NegativeDuration {
                value: self.min_burn_duration,
            });
        }
        Ok(())
    }
}
