use std::fs;

use serde_json::json;
use thrust_core::{
    AlignmentMode, AnalysisOptions, DriftMetric, DriftRun, DriftStatus, FileInput,
    SelectionSource, align_series, analyze_batch, analyze_paths, compare_runs,
};
use thrust_model::MetricOptions;

const RUN_A: &str = "\
Time (s),Thrust (N)
0.0,0.0
0.5,10.0
1.0,100.0
1.5,100.0
2.0,10.0
2.5,0.0
";

const RUN_B: &str = "\
Time (s),Thrust (N)
0.0,0.0
0.5,12.0
1.0,120.0
1.5,120.0
2.0,12.0
2.5,0.0
";

#[test]
fn batch_isolates_failing_files() {
    let inputs = vec![
        FileInput::new("a.csv", RUN_A),
        FileInput::new("broken.json", "[{\"time\": 0,"),
        FileInput::new("b.csv", RUN_B),
    ];
    let result = analyze_batch(inputs, &AnalysisOptions::default());

    assert_eq!(result.analyses.len(), 2);
    assert_eq!(result.file_count(), 3);
    assert!(result.has_errors());
    assert_eq!(result.errors.len(), 1);
    assert!(
        result.errors[0].starts_with("broken.json: failed to parse JSON"),
        "unexpected error: {}",
        result.errors[0]
    );

    let names: Vec<&str> = result
        .analyses
        .iter()
        .map(|analysis| analysis.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
}

#[test]
fn metrics_for_a_clean_run() {
    let result = analyze_batch([FileInput::new("a.csv", RUN_A)], &AnalysisOptions::default());
    let analysis = &result.analyses[0];
    assert_eq!(
        analysis.selection.as_ref().map(|selection| selection.source),
        Some(SelectionSource::Roles)
    );

    let metrics = analysis.metrics.as_ref().expect("metrics computed");
    let rise = metrics.rise_time.expect("rise time");
    assert!((rise - 0.4 / 0.9).abs() < 1e-9);
    assert_eq!(
        serde_json::to_value(metrics).expect("serialize metrics")["burnDuration"],
        json!(1.5)
    );
    assert_eq!(metrics.peak_thrust, Some(100.0));
    assert_eq!(metrics.peak_thrust_time, Some(1.0));
    assert_eq!(metrics.burn_start_time, Some(0.5));
    assert_eq!(metrics.burn_end_time, Some(2.0));
    assert_eq!(metrics.area_under_curve, Some(110.0));
    assert!(analysis.all_warnings().is_empty());
}

#[test]
fn analyze_paths_reads_from_disk_and_reports_missing_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let present = dir.path().join("static_fire.csv");
    fs::write(&present, RUN_A).expect("write file");
    let missing = dir.path().join("absent.csv");

    let result = analyze_paths(&[present, missing], &AnalysisOptions::default());
    assert_eq!(result.analyses.len(), 1);
    assert_eq!(result.analyses[0].file_name, "static_fire.csv");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("absent.csv: failed to read file"));
}

#[test]
fn warnings_are_collected_per_file() {
    let csv = "\
# rig log
a,b
0,0
1,40
2,0.2
";
    let options = AnalysisOptions::new(MetricOptions::default().with_thrust_threshold(1.0));
    let result = analyze_batch([FileInput::new("rig.csv", csv)], &options);
    let analysis = &result.analyses[0];

    insta::assert_json_snapshot!(analysis.all_warnings(), @r###"
    [
      "Skipped comment line: # rig log...",
      "Using auto-detected columns - Time: 'a', Thrust: 'b'",
      "Burn duration (0.000s) below minimum threshold (0.1s)"
    ]
    "###);
}

#[test]
fn drift_between_two_runs() {
    let result = analyze_batch(
        [FileInput::new("a.csv", RUN_A), FileInput::new("b.csv", RUN_B)],
        &AnalysisOptions::default(),
    );
    let runs: Vec<DriftRun<'_>> = result.analyses.iter().map(DriftRun::from_analysis).collect();
    let report = compare_runs(&runs).expect("two runs");

    assert_eq!(report.baseline, "a.csv");
    let peak = report
        .comparison(DriftMetric::PeakThrust)
        .expect("peak compared");
    assert_eq!(peak.values, vec![Some(100.0), Some(120.0)]);
    assert_eq!(peak.drift[0].status, DriftStatus::Increase);
    assert!((peak.drift[0].percent_change - 20.0).abs() < 1e-9);

    let burn = report
        .comparison(DriftMetric::BurnDuration)
        .expect("burn compared");
    assert_eq!(burn.drift[0].status, DriftStatus::Stable);

    let analysis = &result.analyses[1];
    let series = analysis.series.as_ref().expect("series kept");
    let aligned = align_series(series, analysis.metrics.as_ref(), AlignmentMode::BurnStart);
    assert_eq!(aligned.points()[1].time, 0.0);
}
