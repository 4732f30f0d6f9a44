use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use thrust_cli::options::resolve_options;
use thrust_core::{
    AlignmentMode, AnalysisOptions, BatchResult, DriftRun, FileAnalysis, align_series,
    analyze_paths, compare_runs,
};
use thrust_ingest::{detect_column_roles, read_file};
use thrust_model::TimeSeries;

use crate::cli::{AnalyzeArgs, CompareArgs, InspectArgs, MetricArgs};
use crate::types::{AlignedRun, CompareResult, InspectResult};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<BatchResult> {
    let options = options_from_args(&args.metrics)?;
    let span = info_span!("analyze", file_count = args.files.len());
    let _guard = span.enter();
    let start = Instant::now();

    let batch = analyze_paths(&args.files, &options);

    info!(
        analyzed = batch.analyses.len(),
        failed = batch.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(batch)
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareResult> {
    let options = options_from_args(&args.metrics)?;
    let alignment = AlignmentMode::from(args.align);
    let span = info_span!("compare", file_count = args.files.len(), alignment = %alignment);
    let _guard = span.enter();

    let batch = analyze_paths(&args.files, &options);
    let runs: Vec<DriftRun<'_>> = batch.analyses.iter().map(DriftRun::from_analysis).collect();
    let drift = compare_runs(&runs).with_context(|| compare_failure(&batch.errors))?;
    let aligned_runs = batch
        .analyses
        .iter()
        .map(|analysis| aligned_run(analysis, alignment))
        .collect();

    Ok(CompareResult {
        batch,
        drift,
        alignment,
        aligned_runs,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let span = info_span!("inspect", file = %args.file.display());
    let _guard = span.enter();

    let dataset =
        read_file(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let roles = detect_column_roles(&dataset.headers);
    debug!(
        columns = dataset.column_count(),
        roles = roles.len(),
        "inspected file"
    );

    Ok(InspectResult {
        file_name: args.file.display().to_string(),
        dataset,
        roles,
    })
}

fn options_from_args(args: &MetricArgs) -> Result<AnalysisOptions> {
    resolve_options(args.options.as_deref(), &args.overrides())
}

/// Error context for a comparison that could not run. Files that failed to
/// parse are named so they are not lost with the batch.
fn compare_failure(errors: &[String]) -> String {
    if errors.is_empty() {
        "compare runs".to_string()
    } else {
        format!("compare runs ({} failed: {})", errors.len(), errors.join("; "))
    }
}

fn aligned_run(analysis: &FileAnalysis, alignment: AlignmentMode) -> AlignedRun {
    let metrics = analysis.metrics.as_ref();
    let aligned = analysis
        .series
        .as_ref()
        .map(|series| align_series(series, metrics, alignment));
    let points = aligned.as_ref().map(TimeSeries::points).unwrap_or_default();
    AlignedRun {
        name: analysis.file_name.clone(),
        offset: alignment.offset(metrics),
        start_time: points.first().map(|point| point.time),
        end_time: points.last().map(|point| point.time),
    }
}
