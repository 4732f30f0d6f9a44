//! Per-invocation analysis options.

use serde::{Deserialize, Serialize};

use thrust_model::{MetricOptions, OptionsError};

/// Everything one pipeline run needs besides its input files.
///
/// Built explicitly by the caller and passed down; nothing reads options from
/// global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Metric thresholds, stored inline next to the column overrides.
    #[serde(flatten)]
    pub metrics: MetricOptions,
    /// Use this column as the time axis instead of the detected one.
    pub time_column: Option<String>,
    /// Use this column as thrust instead of the detected one.
    pub thrust_column: Option<String>,
}

impl AnalysisOptions {
    pub fn new(metrics: MetricOptions) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub fn with_time_column(mut self, column: impl Into<String>) -> Self {
        self.time_column = Some(column.into());
        self
    }

    pub fn with_thrust_column(mut self, column: impl Into<String>) -> Self {
        self.thrust_column = Some(column.into());
        self
    }

    pub fn has_column_overrides(&self) -> bool {
        self.time_column.is_some() || self.thrust_column.is_some()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        self.metrics.validate()
    }
}
