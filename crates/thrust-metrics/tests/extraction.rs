use proptest::prelude::*;
use thrust_metrics::{MetricExtractor, extract_metrics_from_dataset};
use thrust_model::{
    CellValue, ColumnType, MetricOptions, MetricWarning, RawDataset, TimeSeries, TypeInference,
};

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-9)
}

#[test]
fn rise_time_interpolates_the_end_crossing() {
    let series = TimeSeries::from(vec![(0.0, 0.0), (1.0, 10.0), (2.0, 100.0)]);
    let metrics = MetricExtractor::default().extract_all(&series);
    assert_eq!(metrics.peak_thrust, Some(100.0));
    assert_eq!(metrics.peak_thrust_time, Some(2.0));
    assert!(approx(metrics.rise_time, 0.888_888_888_9));
}

#[test]
fn burn_window_uses_threshold_scan() {
    let series = TimeSeries::from(vec![
        (0.0, 0.0),
        (1.0, 0.5),
        (2.0, 5.0),
        (3.0, 5.0),
        (4.0, 0.5),
        (5.0, 0.0),
    ]);
    let metrics = MetricExtractor::default().extract_all(&series);
    assert_eq!(metrics.burn_start_time, Some(2.0));
    assert_eq!(metrics.burn_end_time, Some(3.0));
    assert_eq!(metrics.burn_duration, Some(1.0));
}

#[test]
fn triangle_impulse() {
    let series = TimeSeries::from(vec![(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]);
    let metrics = MetricExtractor::default().extract_all(&series);
    assert_eq!(metrics.area_under_curve, Some(10.0));
}

#[test]
fn metrics_from_dataset_columns() {
    let cells = |t: f64, f: f64| vec![CellValue::Number(t), CellValue::Number(f)];
    let dataset = RawDataset {
        headers: vec!["t".to_string(), "force".to_string()],
        rows: vec![cells(0.0, 0.0), cells(0.5, 20.0), cells(1.0, 20.0), cells(1.5, 0.0)],
        inferred_types: vec![TypeInference::new(ColumnType::Number, 1.0); 2],
        warnings: Vec::new(),
    };
    let metrics =
        extract_metrics_from_dataset(&dataset, "t", "force", MetricOptions::default()).unwrap();
    assert_eq!(metrics.peak_thrust, Some(20.0));
    assert_eq!(metrics.area_under_curve, Some(20.0));
    assert_eq!(metrics.burn_duration, Some(0.5));
    assert!(metrics.warnings.is_empty());

    let missing = extract_metrics_from_dataset(&dataset, "t", "thrust", MetricOptions::default());
    assert!(missing.is_err());
}

#[test]
fn noisy_series_reports_every_condition_once() {
    let series = TimeSeries::from(vec![
        (0.0, -0.2),
        (0.01, f64::NAN),
        (0.02, 0.4),
        (0.5, 0.3),
    ]);
    let metrics = MetricExtractor::default().extract_all(&series);
    assert_eq!(
        metrics.warning_messages(),
        vec![
            "Non-uniform time sampling detected - results may be less accurate",
            "1 missing or invalid data points detected",
            "1 negative thrust values detected",
            "Peak thrust below threshold - rise time calculation skipped",
            "Could not determine burn start/end times",
        ]
    );
    assert!(metrics.has_warning(&MetricWarning::MissingValues { count: 1 }));
}

fn series_strategy() -> impl Strategy<Value = TimeSeries> {
    prop::collection::vec((0.0..100.0f64, -10.0..500.0f64), 0..60).prop_map(TimeSeries::from)
}

proptest! {
    #[test]
    fn extraction_is_idempotent(series in series_strategy()) {
        let extractor = MetricExtractor::default();
        let first = extractor.extract_all(&series);
        let second = extractor.extract_all(&series);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn warnings_are_unique(series in series_strategy()) {
        let metrics = MetricExtractor::default().extract_all(&series);
        for (idx, warning) in metrics.warnings.iter().enumerate() {
            prop_assert!(!metrics.warnings[idx + 1..].contains(warning));
        }
    }

    #[test]
    fn burn_window_is_ordered(series in series_strategy()) {
        let metrics = MetricExtractor::default().extract_all(&series);
        if let (Some(start), Some(end)) = (metrics.burn_start_time, metrics.burn_end_time) {
            prop_assert!(start <= end);
            prop_assert_eq!(metrics.burn_duration, Some(end - start));
        }
    }
}
