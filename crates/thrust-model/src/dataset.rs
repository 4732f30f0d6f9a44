//! Parsed tabular data: typed cells, column types, and the dataset container.

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// Inferred semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
    Timestamp,
    Boolean,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Whether the column can serve as a time axis.
    pub fn is_time_like(self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Timestamp)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeInference {
    pub column_type: ColumnType,
    /// Fraction of non-empty values consistent with `column_type`, in `[0, 1]`.
    pub confidence: f64,
}

impl TypeInference {
    pub fn new(column_type: ColumnType, confidence: f64) -> Self {
        Self {
            column_type,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Inference result for a column with no usable values.
    pub fn empty() -> Self {
        Self::new(ColumnType::String, 0.0)
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence < 0.5
    }
}

/// A single cell.
///
/// Cells start life as [`CellValue::Text`] (delimited input) or as the JSON
/// scalar they were read from, and are retyped once the column type is known.
/// Values that do not fit the inferred type keep their raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    /// Canonical ISO-8601 UTC timestamp.
    Timestamp(String),
    Text(String),
}

impl CellValue {
    /// True for `Null` and for text that is empty after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) | CellValue::Timestamp(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of the cell: numbers as-is, text parsed strictly.
    ///
    /// Timestamps are not converted here; see the metrics crate for the
    /// epoch-seconds view used on time axes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Timestamp(text) | CellValue::Text(text) => f.write_str(text),
        }
    }
}

/// Output of parsing one file.
///
/// Rows are stored positionally: `rows[i][j]` is the value of `headers[j]`
/// in row `i`. Every row has exactly `headers.len()` cells.
///
/// Serialises as `{headers, rows, inferredTypes, typeConfidence, warnings}`
/// where each row is an object keyed by header in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    /// One entry per header, same order.
    pub inferred_types: Vec<TypeInference>,
    pub warnings: Vec<String>,
}

impl RawDataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, matched exactly.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|name| name == header)
    }

    pub fn column_type(&self, header: &str) -> Option<ColumnType> {
        let idx = self.column_index(header)?;
        self.inferred_types.get(idx).map(|inference| inference.column_type)
    }

    pub fn inference(&self, header: &str) -> Option<&TypeInference> {
        let idx = self.column_index(header)?;
        self.inferred_types.get(idx)
    }

    /// Iterates the cells of one column, or nothing if the header is unknown.
    pub fn column_values<'a>(
        &'a self,
        header: &str,
    ) -> impl Iterator<Item = &'a CellValue> + use<'a> {
        let idx = self.column_index(header);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    pub fn value(&self, row: usize, header: &str) -> Option<&CellValue> {
        let idx = self.column_index(header)?;
        self.rows.get(row).and_then(|cells| cells.get(idx))
    }

    /// Headers whose inferred type matches `predicate`, in header order.
    pub fn headers_where(&self, predicate: impl Fn(ColumnType) -> bool) -> Vec<&str> {
        self.headers
            .iter()
            .zip(&self.inferred_types)
            .filter(|(_, inference)| predicate(inference.column_type))
            .map(|(header, _)| header.as_str())
            .collect()
    }
}

impl Serialize for RawDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowView<'_>> = self
            .rows
            .iter()
            .map(|cells| RowView {
                headers: &self.headers,
                cells,
            })
            .collect();
        let mut state = serializer.serialize_struct("RawDataset", 5)?;
        state.serialize_field("headers", &self.headers)?;
        state.serialize_field("rows", &rows)?;
        state.serialize_field(
            "inferredTypes",
            &HeaderMap::new(&self.headers, &self.inferred_types, |inference: &TypeInference| {
                inference.column_type
            }),
        )?;
        state.serialize_field(
            "typeConfidence",
            &HeaderMap::new(&self.headers, &self.inferred_types, |inference: &TypeInference| {
                inference.confidence
            }),
        )?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// One positional row written as a header-keyed object.
struct RowView<'a> {
    headers: &'a [String],
    cells: &'a [CellValue],
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(self.cells) {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}

/// Per-column values keyed by header.
struct HeaderMap<'a, T, F> {
    headers: &'a [String],
    items: &'a [T],
    project: F,
}

impl<'a, T, F> HeaderMap<'a, T, F> {
    fn new(headers: &'a [String], items: &'a [T], project: F) -> Self {
        Self {
            headers,
            items,
            project,
        }
    }
}

impl<T, F, V> Serialize for HeaderMap<'_, T, F>
where
    F: Fn(&T) -> V,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, item) in self.headers.iter().zip(self.items) {
            map.serialize_entry(header, &(self.project)(item))?;
        }
        map.end()
    }
}
