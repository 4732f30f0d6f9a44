//! Serializable views of analysis results for `--format json`.

use serde::Serialize;

use thrust_core::{BatchResult, ColumnSelection, FileAnalysis};
use thrust_model::{ColumnRole, ColumnRoleMap, ColumnType, PropulsionMetrics, RawDataset};

/// Per-file summary without the row data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport<'a> {
    pub file_name: &'a str,
    pub rows: usize,
    pub columns: usize,
    pub selection: Option<&'a ColumnSelection>,
    pub metrics: Option<&'a PropulsionMetrics>,
    /// Parser, selection and metric warnings in pipeline order.
    pub warnings: Vec<String>,
}

impl<'a> FileReport<'a> {
    pub fn new(analysis: &'a FileAnalysis) -> Self {
        Self {
            file_name: &analysis.file_name,
            rows: analysis.dataset.row_count(),
            columns: analysis.dataset.column_count(),
            selection: analysis.selection.as_ref(),
            metrics: analysis.metrics.as_ref(),
            warnings: analysis.all_warnings(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub files: Vec<FileReport<'a>>,
    pub errors: &'a [String],
}

impl<'a> BatchReport<'a> {
    pub fn new(batch: &'a BatchResult) -> Self {
        Self {
            files: batch.analyses.iter().map(FileReport::new).collect(),
            errors: &batch.errors,
        }
    }
}

/// One column as shown by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport<'a> {
    pub name: &'a str,
    pub column_type: ColumnType,
    pub confidence: f64,
    pub roles: Vec<ColumnRole>,
}

/// Columns in header order with their inferred type and any roles they were
/// assigned.
pub fn column_reports<'a>(
    dataset: &'a RawDataset,
    roles: &ColumnRoleMap,
) -> Vec<ColumnReport<'a>> {
    dataset
        .headers
        .iter()
        .zip(&dataset.inferred_types)
        .map(|(name, inference)| ColumnReport {
            name,
            column_type: inference.column_type,
            confidence: inference.confidence,
            roles: roles
                .iter()
                .filter(|(_, header)| *header == name.as_str())
                .map(|(role, _)| role)
                .collect(),
        })
        .collect()
}

/// Everything `inspect` shows for one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport<'a> {
    pub file_name: &'a str,
    pub rows: usize,
    pub columns: Vec<ColumnReport<'a>>,
    pub roles: &'a ColumnRoleMap,
    pub warnings: &'a [String],
}

impl<'a> InspectReport<'a> {
    pub fn new(file_name: &'a str, dataset: &'a RawDataset, roles: &'a ColumnRoleMap) -> Self {
        Self {
            file_name,
            rows: dataset.row_count(),
            columns: column_reports(dataset, roles),
            roles,
            warnings: &dataset.warnings,
        }
    }
}
