//! Building [`AnalysisOptions`] from an options file and flag overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use thrust_core::AnalysisOptions;

/// Individual values given on the command line. Each one replaces the
/// matching field of the options file (or the default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub thrust_threshold: Option<f64>,
    pub rise_time_start: Option<f64>,
    pub rise_time_end: Option<f64>,
    pub min_burn_duration: Option<f64>,
    pub time_column: Option<String>,
    pub thrust_column: Option<String>,
}

impl OptionOverrides {
    pub fn apply(&self, options: &mut AnalysisOptions) {
        let metrics = &mut options.metrics;
        if let Some(value) = self.thrust_threshold {
            metrics.thrust_threshold = value;
        }
        if let Some(value) = self.rise_time_start {
            metrics.rise_time_start = value;
        }
        if let Some(value) = self.rise_time_end {
            metrics.rise_time_end = value;
        }
        if let Some(value) = self.min_burn_duration {
            metrics.min_burn_duration = value;
        }
        if let Some(column) = &self.time_column {
            options.time_column = Some(column.clone());
        }
        if let Some(column) = &self.thrust_column {
            options.thrust_column = Some(column.clone());
        }
    }
}

/// Reads a JSON options file. Missing keys keep their defaults.
pub fn read_options_file(path: &Path) -> Result<AnalysisOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options file {}", path.display()))
}

/// Resolves the options for one invocation: file (if any), then overrides,
/// then validation.
pub fn resolve_options(
    options_file: Option<&Path>,
    overrides: &OptionOverrides,
) -> Result<AnalysisOptions> {
    let mut options = match options_file {
        Some(path) => read_options_file(path)?,
        None => AnalysisOptions::default(),
    };
    overrides.apply(&mut options);
    options.validate().context("invalid metric options")?;
    debug!(?options, "resolved analysis options");
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = OptionOverrides {
            thrust_threshold: Some(5.0),
            thrust_column: Some("load".to_string()),
            ..OptionOverrides::default()
        };
        let options = resolve_options(None, &overrides).unwrap();
        assert_eq!(options.metrics.thrust_threshold, 5.0);
        assert_eq!(options.metrics.rise_time_start, 0.1);
        assert_eq!(options.thrust_column.as_deref(), Some("load"));
        assert_eq!(options.time_column, None);
    }

    #[test]
    fn invalid_window_is_rejected() {
        let overrides = OptionOverrides {
            rise_time_start: Some(0.95),
            ..OptionOverrides::default()
        };
        let error = resolve_options(None, &overrides).unwrap_err();
        assert_eq!(error.to_string(), "invalid metric options");
    }
}
