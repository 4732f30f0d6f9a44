//! Per-file analysis and batch aggregation.
//!
//! Each file runs parse → role detection → column selection → metric
//! extraction on its own. A file that cannot be parsed becomes one error
//! string in the batch result and the remaining files are still analysed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use thrust_ingest::{IngestError, detect_column_roles, parse_file};
use thrust_metrics::{MetricExtractor, prepare_time_series};
use thrust_model::{ColumnRoleMap, Diagnostics, PropulsionMetrics, RawDataset, TimeSeries};

use crate::options::AnalysisOptions;
use crate::selection::{ColumnSelection, Selection, SelectionSource, select_columns};

/// One file to analyse: its name (for format detection and messages) and
/// its raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileInput {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, naming the input after the file name.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            name: display_name(path),
            bytes,
        })
    }
}

/// File name of `path`, or the whole path when it has none.
fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// Everything produced for one successfully parsed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub file_name: String,
    pub dataset: RawDataset,
    pub roles: ColumnRoleMap,
    pub selection: Option<ColumnSelection>,
    /// Series the metrics were computed from, time-sorted.
    #[serde(skip)]
    pub series: Option<TimeSeries>,
    /// `None` when no usable time/thrust pair was found.
    pub metrics: Option<PropulsionMetrics>,
    /// Pipeline-level notes such as auto-selected columns. Parser warnings
    /// stay on the dataset and metric warnings on the metrics.
    pub warnings: Diagnostics,
}

impl FileAnalysis {
    /// Every warning for this file in pipeline order: parsing, selection,
    /// metrics.
    pub fn all_warnings(&self) -> Vec<String> {
        let mut all = Diagnostics::new();
        all.extend(self.dataset.warnings.iter().cloned());
        all.extend(self.warnings.iter().map(str::to_string));
        if let Some(metrics) = &self.metrics {
            all.extend(metrics.warning_messages());
        }
        all.into_vec()
    }
}

/// Combined outcome of a batch. Append-only, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    pub analyses: Vec<FileAnalysis>,
    /// One `"<file>: <error>"` entry per file that could not be parsed.
    pub errors: Vec<String>,
}

impl BatchResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.analyses.len() + self.errors.len()
    }

    fn record(&mut self, name: &str, outcome: Result<FileAnalysis, IngestError>) {
        match outcome {
            Ok(analysis) => self.analyses.push(analysis),
            Err(error) => {
                warn!(file = %name, error = %error, "file failed");
                self.errors.push(format!("{name}: {error}"));
            }
        }
    }
}

/// Analyses one file.
///
/// Only parse failures are errors. Missing columns and metric problems are
/// recorded as warnings on the returned analysis.
pub fn analyze_file(
    input: &FileInput,
    options: &AnalysisOptions,
) -> Result<FileAnalysis, IngestError> {
    let span = info_span!("analyze_file", file = %input.name);
    let _guard = span.enter();
    let start = Instant::now();

    let dataset = parse_file(&input.name, &input.bytes)?;
    let roles = detect_column_roles(&dataset.headers);
    debug!(roles = roles.len(), "detected column roles");

    let mut warnings = Diagnostics::new();
    let selection = match select_columns(&dataset, &roles, options) {
        Selection::Selected(selection) => {
            if selection.source == SelectionSource::AutoDetected {
                warnings.push(format!(
                    "Using auto-detected columns - Time: '{}', Thrust: '{}'",
                    selection.time, selection.thrust
                ));
            }
            Some(selection)
        }
        Selection::UnknownColumn(column) => {
            warnings.push(format!("Column '{column}' not found; metrics not computed"));
            None
        }
        Selection::NotFound => {
            warnings.push("Could not identify time and thrust columns; metrics not computed");
            None
        }
    };

    let mut series = None;
    let mut metrics = None;
    if let Some(selection) = &selection {
        match prepare_time_series(&dataset, &selection.time, &selection.thrust) {
            Ok(prepared) => {
                metrics = Some(MetricExtractor::new(options.metrics).extract_all(&prepared));
                series = Some(prepared);
            }
            Err(error) => warnings.push(format!("Metric extraction failed: {error}")),
        }
    }

    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        has_metrics = metrics.is_some(),
        duration_ms = start.elapsed().as_millis(),
        "file analyzed"
    );

    Ok(FileAnalysis {
        file_name: input.name.clone(),
        dataset,
        roles,
        selection,
        series,
        metrics,
        warnings,
    })
}

/// Analyses files one after another. A failing file never stops the batch.
pub fn analyze_batch<I>(inputs: I, options: &AnalysisOptions) -> BatchResult
where
    I: IntoIterator<Item = FileInput>,
{
    let mut result = BatchResult::default();
    for input in inputs {
        let outcome = analyze_file(&input, options);
        result.record(&input.name, outcome);
    }
    info!(
        analyzed = result.analyses.len(),
        failed = result.errors.len(),
        "batch complete"
    );
    result
}

/// Reads and analyses files from disk. Unreadable files are batch errors.
pub fn analyze_paths(paths: &[PathBuf], options: &AnalysisOptions) -> BatchResult {
    let mut result = BatchResult::default();
    for path in paths {
        let name = display_name(path);
        let outcome = FileInput::from_path(path).and_then(|input| analyze_file(&input, options));
        result.record(&name, outcome);
    }
    info!(
        analyzed = result.analyses.len(),
        failed = result.errors.len(),
        "batch complete"
    );
    result
}
