//! Tests for thrust-model types.

use thrust_model::{
    CellValue, ColumnRole, ColumnRoleMap, ColumnType, MetricOptions, MetricWarning,
    PropulsionMetrics, RawDataset, TimeSeries, TypeInference,
};

#[test]
fn dataset_serializes_rows_keyed_by_header() {
    let dataset = RawDataset {
        headers: vec!["time".to_string(), "ok".to_string(), "stamp".to_string()],
        rows: vec![vec![
            CellValue::Number(0.5),
            CellValue::Bool(true),
            CellValue::Timestamp("2024-01-01T00:00:00.000Z".to_string()),
        ]],
        inferred_types: vec![
            TypeInference::new(ColumnType::Number, 1.0),
            TypeInference::new(ColumnType::Boolean, 1.0),
            TypeInference::new(ColumnType::Timestamp, 1.0),
        ],
        warnings: vec![],
    };
    let json = serde_json::to_value(&dataset).expect("serialize dataset");
    assert_eq!(json["rows"][0]["time"], 0.5);
    assert_eq!(json["rows"][0]["ok"], true);
    assert_eq!(json["rows"][0]["stamp"], "2024-01-01T00:00:00.000Z");
    assert_eq!(json["inferredTypes"]["ok"], "boolean");
    assert_eq!(json["typeConfidence"]["stamp"], 1.0);
    assert!(json.get("inferred_types").is_none());
}

#[test]
fn role_map_serializes_as_object() {
    let mut roles = ColumnRoleMap::new();
    roles.insert(ColumnRole::Thrust, "Force");
    let json = serde_json::to_value(&roles).expect("serialize roles");
    assert_eq!(json["thrust"], "Force");
}

#[test]
fn options_round_trip_through_camel_case_json() {
    let options = MetricOptions::new()
        .with_thrust_threshold(2.5)
        .with_min_burn_duration(0.25);
    let json = serde_json::to_string(&options).expect("serialize options");
    assert!(json.contains("\"thrustThreshold\":2.5"));
    let round: MetricOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
}

#[test]
fn metrics_report_warnings_verbatim() {
    let metrics = PropulsionMetrics {
        warnings: vec![
            MetricWarning::InsufficientData,
            MetricWarning::PeakBelowThreshold,
        ],
        ..PropulsionMetrics::default()
    };
    assert_eq!(
        metrics.warning_messages(),
        vec![
            "Insufficient data points for metric calculation",
            "Peak thrust below threshold - rise time calculation skipped",
        ]
    );
    assert!(metrics.has_warning(&MetricWarning::InsufficientData));
}

#[test]
fn time_series_from_pairs_is_sorted() {
    let series = TimeSeries::from(vec![(3.0, 1.0), (1.0, 2.0)]);
    assert_eq!(series.points()[0].time, 1.0);
    assert_eq!(series.len(), 2);
}
