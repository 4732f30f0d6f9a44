//! Metric extractor tying the individual computations together.

use thrust_model::{MetricOptions, PropulsionMetrics, RawDataset, TimeSeries, merge_warnings};

use crate::burn::{BurnResult, burn_duration};
use crate::error::Result;
use crate::impulse::{ImpulseResult, area_under_curve};
use crate::peak::{PeakResult, peak_thrust};
use crate::rise::{RiseTimeResult, rise_time};
use crate::series::prepare_time_series;

/// Computes propulsion metrics with a fixed set of options.
///
/// Stateless apart from its options: every call is a pure function of the
/// series it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricExtractor {
    options: MetricOptions,
}

impl MetricExtractor {
    pub fn new(options: MetricOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MetricOptions {
        &self.options
    }

    pub fn calculate_rise_time(&self, series: &TimeSeries) -> RiseTimeResult {
        rise_time(series, &self.options)
    }

    pub fn calculate_peak_thrust(&self, series: &TimeSeries) -> PeakResult {
        peak_thrust(series)
    }

    pub fn calculate_burn_duration(&self, series: &TimeSeries) -> BurnResult {
        burn_duration(series, &self.options)
    }

    pub fn calculate_area_under_curve(&self, series: &TimeSeries) -> ImpulseResult {
        area_under_curve(series)
    }

    /// Runs every computation independently and merges their warnings.
    pub fn extract_all(&self, series: &TimeSeries) -> PropulsionMetrics {
        let rise = self.calculate_rise_time(series);
        let peak = self.calculate_peak_thrust(series);
        let burn = self.calculate_burn_duration(series);
        let impulse = self.calculate_area_under_curve(series);

        let mut warnings = Vec::new();
        merge_warnings(&mut warnings, rise.warnings);
        merge_warnings(&mut warnings, peak.warnings);
        merge_warnings(&mut warnings, burn.warnings);
        merge_warnings(&mut warnings, impulse.warnings);

        let metrics = PropulsionMetrics {
            rise_time: rise.rise_time,
            peak_thrust: peak.peak_thrust,
            peak_thrust_time: peak.peak_thrust_time,
            burn_duration: burn.burn_duration,
            burn_start_time: burn.burn_start_time,
            burn_end_time: burn.burn_end_time,
            area_under_curve: impulse.area_under_curve,
            warnings,
        };
        tracing::debug!(
            points = series.len(),
            peak = ?metrics.peak_thrust,
            burn = ?metrics.burn_duration,
            impulse = ?metrics.area_under_curve,
            warnings = metrics.warnings.len(),
            "extracted metrics"
        );
        metrics
    }

    /// Builds the series from two dataset columns and extracts metrics.
    pub fn extract_from_dataset(
        &self,
        dataset: &RawDataset,
        time_column: &str,
        thrust_column: &str,
    ) -> Result<PropulsionMetrics> {
        let series = prepare_time_series(dataset, time_column, thrust_column)?;
        Ok(self.extract_all(&series))
    }
}
