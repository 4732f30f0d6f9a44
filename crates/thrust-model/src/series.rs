//! Time-series points and the sorted series container.

use serde::{Deserialize, Serialize};

/// One sample of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: f64,
    /// `NaN` marks a missing or invalid sample.
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from((time, value): (f64, f64)) -> Self {
        Self::new(time, value)
    }
}

/// Points ordered ascending by time.
///
/// Construction always re-sorts (stable, `f64::total_cmp`), so callers never
/// need to pre-sort and the original order is never assumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn new(mut points: Vec<TimeSeriesPoint>) -> Self {
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { points }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeriesPoint> {
        self.points.iter()
    }

    /// Consecutive point pairs in time order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TimeSeriesPoint, &TimeSeriesPoint)> {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Copy of the series with every time shifted by `offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|point| TimeSeriesPoint::new(point.time + offset, point.value))
                .collect(),
        }
    }

    pub fn into_points(self) -> Vec<TimeSeriesPoint> {
        self.points
    }
}

impl FromIterator<TimeSeriesPoint> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = TimeSeriesPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<(f64, f64)>> for TimeSeries {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        pairs.into_iter().map(TimeSeriesPoint::from).collect()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeSeriesPoint;
    type IntoIter = std::slice::Iter<'a, TimeSeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
