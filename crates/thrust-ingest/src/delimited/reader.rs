//! Delimited text to untyped table.

use csv::{ReaderBuilder, StringRecord, Trim};

use thrust_model::CellValue;

use super::header::repair_headers;
use crate::error::{IngestError, Result};
use crate::structure::{Delimiter, collapse_multi_space, detect_delimiter, strip_preamble};
use crate::table::RawTable;

/// Stand-in separator for whitespace-run delimited text. Unit separator never
/// appears in sensor exports.
const MULTI_SPACE_SEPARATOR: char = '\u{1f}';

/// Parses CSV-like text.
///
/// Comment and blank lines are stripped first. `delimiter` forces a field
/// separator; `None` runs detection. Any separator other than comma is named
/// in a warning. The first remaining line is the header.
/// Short rows are padded with nulls, rows with only empty cells are dropped,
/// and surplus cells are discarded if empty.
pub fn parse_delimited(raw: &str, delimiter: Option<Delimiter>) -> Result<RawTable> {
    let cleaned = strip_preamble(raw);
    let mut warnings = cleaned.warnings;

    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&cleaned.text));
    if delimiter != Delimiter::Comma {
        warnings.push(format!("Detected {} delimiter", delimiter.name()));
    }

    if cleaned.text.matches('"').count() % 2 != 0 {
        return Err(IngestError::parse("unterminated quoted field"));
    }

    let (text, separator) = match delimiter.as_byte() {
        Some(byte) => (cleaned.text, byte),
        None => (
            collapse_multi_space(&cleaned.text, MULTI_SPACE_SEPARATOR),
            MULTI_SPACE_SEPARATOR as u8,
        ),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(separator)
        .double_quote(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|e| IngestError::parse(e.to_string()))?,
        None => return Err(IngestError::parse("no header row found")),
    };
    let raw_headers: Vec<String> = header_record.iter().map(str::to_string).collect();
    let headers = repair_headers(&raw_headers, &mut warnings);
    let width = headers.len();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in records {
        let record = record.map_err(|e| IngestError::parse(e.to_string()))?;
        let row = record_to_row(&record, width)?;
        if row.iter().all(CellValue::is_empty) {
            dropped += 1;
            continue;
        }
        rows.push(row);
    }

    if dropped > 0 {
        warnings.push(format!("Removed {dropped} empty rows"));
    }
    tracing::debug!(
        delimiter = %delimiter,
        columns = width,
        rows = rows.len(),
        dropped,
        "parsed delimited text"
    );

    Ok(RawTable {
        headers,
        rows,
        warnings,
    })
}

fn record_to_row(record: &StringRecord, width: usize) -> Result<Vec<CellValue>> {
    if record.len() > width && record.iter().skip(width).any(|field| !field.is_empty()) {
        let line = record.position().map_or(0, csv::Position::line);
        return Err(IngestError::parse(format!(
            "too many fields on line {line}: expected {width}, found {}",
            record.len()
        )));
    }

    let mut row: Vec<CellValue> = record
        .iter()
        .take(width)
        .map(|field| {
            if field.is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(field.to_string())
            }
        })
        .collect();
    row.resize(width, CellValue::Null);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn parses_simple_csv() {
        let table = parse_delimited("time,thrust\n0.0,1.5\n0.1,9.0\n", None).unwrap();
        assert_eq!(table.headers, vec!["time", "thrust"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec![text("0.1"), text("9.0")]);
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn pads_short_rows_with_nulls() {
        let table = parse_delimited("a,b,c\n1,2\n4,5,6\n", None).unwrap();
        assert_eq!(table.rows[0], vec![text("1"), text("2"), CellValue::Null]);
    }

    #[test]
    fn drops_empty_rows_and_reports_count() {
        let table = parse_delimited("a,b\n1,2\n,\n , \n3,4\n", None).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.warnings, vec!["Removed 2 empty rows"]);
    }

    #[test]
    fn reports_non_comma_delimiter() {
        let input = "time;thrust;pressure\n0,0;1,5;2\n0,1;9,0;3\n";
        let table = parse_delimited(input, None).unwrap();
        assert_eq!(table.rows[0], vec![text("0,0"), text("1,5"), text("2")]);
        assert_eq!(table.warnings, vec!["Detected semicolon delimiter"]);
    }

    #[test]
    fn forced_delimiter_skips_detection_but_is_reported() {
        let table = parse_delimited("time\tthrust\n0\t1,2\n", Some(Delimiter::Tab)).unwrap();
        assert_eq!(table.headers, vec!["time", "thrust"]);
        assert_eq!(table.rows[0], vec![text("0"), text("1,2")]);
        assert_eq!(table.warnings, vec!["Detected tab delimiter"]);
    }

    #[test]
    fn forced_comma_is_not_reported() {
        let table = parse_delimited("time,thrust\n0,1\n", Some(Delimiter::Comma)).unwrap();
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_quotes() {
        let table = parse_delimited("name,note\nrun 1,\"nominal, \"\"clean\"\"\"\n", None).unwrap();
        assert_eq!(table.rows[0][1], text("nominal, \"clean\""));
    }

    #[test]
    fn whitespace_runs_split_fields() {
        let text_input = "time    thrust    pressure\n0.0     1.5       2\n0.1     9.0       3\n";
        let table = parse_delimited(text_input, None).unwrap();
        assert_eq!(table.headers, vec!["time", "thrust", "pressure"]);
        assert_eq!(table.rows[1], vec![text("0.1"), text("9.0"), text("3")]);
        assert_eq!(table.warnings, vec!["Detected multi-space delimiter"]);
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let err = parse_delimited("a,b\n\"open,2\n", None).unwrap_err();
        assert!(err.to_string().contains("unterminated quoted field"));
    }

    #[test]
    fn surplus_empty_fields_are_ignored() {
        let table = parse_delimited("a,b\n1,2,,\n", None).unwrap();
        assert_eq!(table.rows[0], vec![text("1"), text("2")]);
    }

    #[test]
    fn surplus_values_are_a_parse_error() {
        let err = parse_delimited("a,b\n1,2\n3,4,5\n", None).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
        assert!(err.to_string().contains("too many fields on line 3"));
    }

    #[test]
    fn comment_only_input_has_no_header() {
        let err = parse_delimited("# nothing here\n\n", None).unwrap_err();
        assert!(err.to_string().contains("no header row found"));
    }
}
