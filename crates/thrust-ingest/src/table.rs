//! Untyped tables and their conversion into typed datasets.

use thrust_model::{CellValue, ColumnType, RawDataset, TypeInference};

use crate::inference::{infer_column_type, normalize_timestamp, parse_boolean, parse_number};

/// Parser output before type inference.
///
/// Rows are already padded to `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub warnings: Vec<String>,
}

/// Infers column types, retypes cells, and reports low-confidence columns.
pub fn finalize(table: RawTable) -> RawDataset {
    let RawTable {
        headers,
        mut rows,
        mut warnings,
    } = table;

    for row in &mut rows {
        for cell in row.iter_mut() {
            if cell.is_empty() {
                *cell = CellValue::Null;
            }
        }
    }

    let mut inferred_types = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let inference = infer_column_type(rows.iter().filter_map(|row| row.get(idx)));
        if inference.is_low_confidence() {
            warnings.push(format!(
                "Low confidence ({:.1}%) for type inference of column '{header}'",
                inference.confidence * 100.0
            ));
        }
        tracing::debug!(
            column = %header,
            column_type = %inference.column_type,
            confidence = inference.confidence,
            "inferred column type"
        );
        inferred_types.push(inference);
    }

    for row in &mut rows {
        for (cell, inference) in row.iter_mut().zip(&inferred_types) {
            retype_cell(cell, inference);
        }
    }

    RawDataset {
        headers,
        rows,
        inferred_types,
        warnings,
    }
}

/// Converts a cell to its column's type. Cells that do not fit stay as read.
fn retype_cell(cell: &mut CellValue, inference: &TypeInference) {
    let converted = match (inference.column_type, &*cell) {
        (ColumnType::Number, CellValue::Text(text)) => parse_number(text).map(CellValue::Number),
        (ColumnType::Boolean, CellValue::Text(text)) => parse_boolean(text).map(CellValue::Bool),
        (ColumnType::Boolean, CellValue::Number(value)) if *value == 0.0 || *value == 1.0 => {
            Some(CellValue::Bool(*value == 1.0))
        }
        (ColumnType::Timestamp, CellValue::Text(_) | CellValue::Number(_)) => {
            normalize_timestamp(cell).map(CellValue::Timestamp)
        }
        _ => None,
    };
    if let Some(converted) = converted {
        *cell = converted;
    }
}
