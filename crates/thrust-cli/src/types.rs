use serde::Serialize;

use thrust_core::{AlignmentMode, BatchResult, DriftReport};
use thrust_model::{ColumnRoleMap, RawDataset};

#[derive(Debug)]
pub struct CompareResult {
    pub batch: BatchResult,
    pub drift: DriftReport,
    pub alignment: AlignmentMode,
    pub aligned_runs: Vec<AlignedRun>,
}

/// Time window of one run after alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedRun {
    pub name: String,
    pub offset: f64,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport<'a> {
    pub drift: &'a DriftReport,
    pub alignment: AlignmentMode,
    pub aligned_runs: &'a [AlignedRun],
    pub errors: &'a [String],
}

impl<'a> CompareReport<'a> {
    pub fn new(result: &'a CompareResult) -> Self {
        Self {
            drift: &result.drift,
            alignment: result.alignment,
            aligned_runs: &result.aligned_runs,
            errors: &result.batch.errors,
        }
    }
}

#[derive(Debug)]
pub struct InspectResult {
    pub file_name: String,
    pub dataset: RawDataset,
    pub roles: ColumnRoleMap,
}
