//! Building numeric time series from parsed datasets.

use chrono::DateTime;

use thrust_model::{CellValue, RawDataset, TimeSeries, TimeSeriesPoint};

use crate::error::{MetricsError, Result};

/// Numeric view of a cell for use on a plot axis.
///
/// Numbers pass through, booleans become 1/0, timestamps become Unix epoch
/// seconds (with millisecond precision), and text is parsed strictly.
pub fn cell_to_f64(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Null => None,
        CellValue::Number(value) => Some(*value),
        CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        CellValue::Timestamp(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.timestamp_millis() as f64 / 1000.0),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
    };
    value.filter(|value| value.is_finite())
}

/// Pairs two columns into a time-sorted series.
///
/// Rows where either cell has no finite numeric value are dropped.
pub fn prepare_time_series(
    dataset: &RawDataset,
    time_column: &str,
    value_column: &str,
) -> Result<TimeSeries> {
    let time_idx = column_index(dataset, time_column)?;
    let value_idx = column_index(dataset, value_column)?;

    let points: Vec<TimeSeriesPoint> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let time = cell_to_f64(row.get(time_idx)?)?;
            let value = cell_to_f64(row.get(value_idx)?)?;
            Some(TimeSeriesPoint::new(time, value))
        })
        .collect();

    let dropped = dataset.row_count() - points.len();
    if dropped > 0 {
        tracing::debug!(
            time_column,
            value_column,
            dropped,
            "dropped rows without numeric time/value"
        );
    }
    Ok(TimeSeries::new(points))
}

fn column_index(dataset: &RawDataset, column: &str) -> Result<usize> {
    dataset
        .column_index(column)
        .ok_or_else(|| MetricsError::UnknownColumn {
            column: column.to_string(),
        })
}
