//! JSON record parsing.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use thrust_model::CellValue;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Parses a JSON array of flat records, or a single flat record.
///
/// Record values must be strings, numbers, booleans or null; a single record
/// may also hold arrays, which are kept as their JSON text. Headers are the
/// keys of the first record in document order. Keys missing from later
/// records become null; keys absent from the first record are ignored.
pub fn parse_json(text: &str) -> Result<RawTable> {
    let document: Value = serde_json::from_str(text)?;
    let mut warnings = Vec::new();

    let records = match document {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                let record = match item {
                    Value::Object(record) => record,
                    other => {
                        return Err(IngestError::validation(format!(
                            "element {idx} is {}, expected an object",
                            kind(&other)
                        )));
                    }
                };
                check_record(&record, false, Some(idx))?;
                records.push(record);
            }
            records
        }
        Value::Object(record) => {
            check_record(&record, true, None)?;
            warnings.push("Single JSON object converted to array format".to_string());
            vec![record]
        }
        _ => {
            return Err(IngestError::validation(
                "JSON must be an object or array of objects",
            ));
        }
    };

    let headers: Vec<String> = records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default();

    let mut ignored: BTreeSet<&str> = BTreeSet::new();
    for record in records.iter().skip(1) {
        for key in record.keys() {
            if !headers.contains(key) {
                ignored.insert(key);
            }
        }
    }
    if !ignored.is_empty() {
        let names: Vec<&str> = ignored.into_iter().collect();
        warnings.push(format!(
            "Ignored fields not present in the first record: {}",
            names.join(", ")
        ));
    }

    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| record.get(header).map_or(CellValue::Null, to_cell))
                .collect()
        })
        .collect();

    tracing::debug!(columns = headers.len(), "parsed JSON records");

    Ok(RawTable {
        headers,
        rows,
        warnings,
    })
}

fn check_record(
    record: &Map<String, Value>,
    allow_arrays: bool,
    index: Option<usize>,
) -> Result<()> {
    for (key, value) in record {
        let allowed = match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
            Value::Array(_) => allow_arrays,
            Value::Object(_) => false,
        };
        if !allowed {
            let location = index.map_or_else(String::new, |idx| format!("record {idx}: "));
            return Err(IngestError::validation(format!(
                "{location}field '{key}' is {}, expected a string, number, boolean or null",
                kind(value)
            )));
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(flag) => CellValue::Bool(*flag),
        Value::Number(number) => number.as_f64().map_or(CellValue::Null, CellValue::Number),
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_of_records() {
        let table = parse_json(r#"[{"t":0,"thrust":1.5},{"t":0.1,"thrust":null}]"#).unwrap();
        assert_eq!(table.headers, vec!["t", "thrust"]);
        assert_eq!(table.rows[0], vec![CellValue::Number(0.0), CellValue::Number(1.5)]);
        assert_eq!(table.rows[1][1], CellValue::Null);
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn headers_follow_document_order() {
        let table = parse_json(r#"[{"zeta":1,"alpha":2}]"#).unwrap();
        assert_eq!(table.headers, vec!["zeta", "alpha"]);
    }

    #[test]
    fn missing_keys_become_null_and_extra_keys_are_reported() {
        let table = parse_json(r#"[{"a":1,"b":2},{"a":3,"c":true}]"#).unwrap();
        assert_eq!(table.rows[1], vec![CellValue::Number(3.0), CellValue::Null]);
        assert_eq!(
            table.warnings,
            vec!["Ignored fields not present in the first record: c"]
        );
    }

    #[test]
    fn single_object_is_promoted() {
        let table = parse_json(r#"{"motor":"K550","samples":[1,2]}"#).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], CellValue::Text("[1,2]".to_string()));
        assert_eq!(
            table.warnings,
            vec!["Single JSON object converted to array format"]
        );
    }

    #[test]
    fn nested_objects_are_rejected() {
        let err = parse_json(r#"[{"a":{"b":1}}]"#).unwrap_err();
        assert!(matches!(err, IngestError::Validation { .. }));
        assert!(err.to_string().contains("record 0: field 'a' is an object"));
    }

    #[test]
    fn arrays_inside_array_records_are_rejected() {
        let err = parse_json(r#"[{"a":[1]}]"#).unwrap_err();
        assert!(matches!(err, IngestError::Validation { .. }));
    }

    #[test]
    fn non_object_elements_are_rejected() {
        let err = parse_json("[1, 2]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid JSON structure: element 0 is a number, expected an object"
        );
    }

    #[test]
    fn scalar_documents_are_rejected() {
        let err = parse_json("42").unwrap_err();
        assert!(err.to_string().contains("JSON must be an object or array of objects"));
    }

    #[test]
    fn syntax_errors_keep_serde_detail() {
        let err = parse_json(r#"[{"a":1},"#).unwrap_err();
        assert!(matches!(err, IngestError::Json { .. }));
    }

    #[test]
    fn empty_array_yields_empty_table() {
        let table = parse_json("[]").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
