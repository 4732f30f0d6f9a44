//! Run-to-run drift comparison.
//!
//! Each metric of every run is compared against the first run (the
//! baseline). Changes within ±[`STABLE_BAND_PERCENT`] are reported as
//! stable.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use thrust_model::{PropulsionMetrics, TimeSeries};

use crate::error::{DriftError, Result};
use crate::pipeline::FileAnalysis;

/// Percent change below which a metric counts as unchanged.
pub const STABLE_BAND_PERCENT: f64 = 5.0;

/// Reference point used to line up runs on a shared time axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignmentMode {
    /// Raw timestamps.
    None,
    /// t = 0 at burn start.
    #[default]
    BurnStart,
    /// t = 0 at peak thrust.
    Peak,
}

impl AlignmentMode {
    /// Time offset to add to every sample of a run.
    ///
    /// Zero when the run has no metrics or lacks the reference time.
    pub fn offset(self, metrics: Option<&PropulsionMetrics>) -> f64 {
        let reference = match self {
            AlignmentMode::None => None,
            AlignmentMode::BurnStart => metrics.and_then(|m| m.burn_start_time),
            AlignmentMode::Peak => metrics.and_then(|m| m.peak_thrust_time),
        };
        reference.map_or(0.0, |time| -time)
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlignmentMode::None => "none",
            AlignmentMode::BurnStart => "burn start",
            AlignmentMode::Peak => "peak",
        })
    }
}

/// Shifts `series` so its reference time lands on zero.
pub fn align_series(
    series: &TimeSeries,
    metrics: Option<&PropulsionMetrics>,
    mode: AlignmentMode,
) -> TimeSeries {
    series.shifted(mode.offset(metrics))
}

/// Metrics compared between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DriftMetric {
    PeakThrust,
    RiseTime,
    BurnDuration,
    TotalImpulse,
}

impl DriftMetric {
    pub const ALL: [DriftMetric; 4] = [
        DriftMetric::PeakThrust,
        DriftMetric::RiseTime,
        DriftMetric::BurnDuration,
        DriftMetric::TotalImpulse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DriftMetric::PeakThrust => "Peak Thrust",
            DriftMetric::RiseTime => "Rise Time",
            DriftMetric::BurnDuration => "Burn Duration",
            DriftMetric::TotalImpulse => "Total Impulse",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            DriftMetric::PeakThrust => "N",
            DriftMetric::RiseTime | DriftMetric::BurnDuration => "s",
            DriftMetric::TotalImpulse => "N·s",
        }
    }

    pub fn value(self, metrics: &PropulsionMetrics) -> Option<f64> {
        match self {
            DriftMetric::PeakThrust => metrics.peak_thrust,
            DriftMetric::RiseTime => metrics.rise_time,
            DriftMetric::BurnDuration => metrics.burn_duration,
            DriftMetric::TotalImpulse => metrics.area_under_curve,
        }
    }
}

impl fmt::Display for DriftMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.unit())
    }
}

/// Direction of a metric change relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DriftStatus {
    Increase,
    Decrease,
    Stable,
}

impl DriftStatus {
    fn from_percent(percent: f64) -> Self {
        if percent > STABLE_BAND_PERCENT {
            DriftStatus::Increase
        } else if percent < -STABLE_BAND_PERCENT {
            DriftStatus::Decrease
        } else {
            DriftStatus::Stable
        }
    }
}

impl fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriftStatus::Increase => "increase",
            DriftStatus::Decrease => "decrease",
            DriftStatus::Stable => "stable",
        })
    }
}

/// One run taking part in a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRun<'a> {
    pub name: &'a str,
    /// `None` for a file whose metrics could not be computed.
    pub metrics: Option<&'a PropulsionMetrics>,
}

impl<'a> DriftRun<'a> {
    pub fn new(name: &'a str, metrics: Option<&'a PropulsionMetrics>) -> Self {
        Self { name, metrics }
    }

    pub fn from_analysis(analysis: &'a FileAnalysis) -> Self {
        Self::new(&analysis.file_name, analysis.metrics.as_ref())
    }

    fn value(&self, metric: DriftMetric) -> Option<f64> {
        self.metrics.and_then(|metrics| metric.value(metrics))
    }
}

/// Change of one metric for one non-baseline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftEntry {
    pub run: String,
    pub absolute_change: f64,
    pub percent_change: f64,
    pub status: DriftStatus,
}

impl DriftEntry {
    /// Compares `value` against `baseline`.
    ///
    /// A missing, zero or non-finite operand gives a stable entry with zero
    /// change.
    pub fn between(run: impl Into<String>, baseline: Option<f64>, value: Option<f64>) -> Self {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v != 0.0);
        let (absolute_change, percent_change, status) = match (usable(baseline), usable(value)) {
            (Some(base), Some(value)) => {
                let percent = (value - base) / base * 100.0;
                (value - base, percent, DriftStatus::from_percent(percent))
            }
            _ => (0.0, 0.0, DriftStatus::Stable),
        };
        Self {
            run: run.into(),
            absolute_change,
            percent_change,
            status,
        }
    }
}

/// All runs' values of one metric and their drift from the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub metric: DriftMetric,
    /// One value per run, baseline first.
    pub values: Vec<Option<f64>>,
    /// One entry per run after the baseline.
    pub drift: Vec<DriftEntry>,
}

impl MetricComparison {
    pub fn has_drift(&self) -> bool {
        self.drift
            .iter()
            .any(|entry| entry.status != DriftStatus::Stable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub baseline: String,
    pub runs: Vec<String>,
    pub comparisons: Vec<MetricComparison>,
}

impl DriftReport {
    pub fn comparison(&self, metric: DriftMetric) -> Option<&MetricComparison> {
        self.comparisons
            .iter()
            .find(|comparison| comparison.metric == metric)
    }
}

/// Compares every run against the first one.
pub fn compare_runs(runs: &[DriftRun<'_>]) -> Result<DriftReport> {
    let [baseline, rest @ ..] = runs else {
        return Err(DriftError::NotEnoughRuns { count: runs.len() });
    };
    if rest.is_empty() {
        return Err(DriftError::NotEnoughRuns { count: 1 });
    }

    let comparisons = DriftMetric::ALL
        .into_iter()
        .map(|metric| {
            let base = baseline.value(metric);
            MetricComparison {
                metric,
                values: runs.iter().map(|run| run.value(metric)).collect(),
                drift: rest
                    .iter()
                    .map(|run| DriftEntry::between(run.name, base, run.value(metric)))
                    .collect(),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        runs = runs.len(),
        drifting = comparisons.iter().filter(|c| c.has_drift()).count(),
        "drift comparison complete"
    );

    Ok(DriftReport {
        baseline: baseline.name.to_string(),
        runs: runs.iter().map(|run| run.name.to_string()).collect(),
        comparisons,
    })
}
