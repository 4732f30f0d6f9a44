//! Column type inference and timestamp normalization.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

use thrust_model::{CellValue, ColumnType, TypeInference};

/// Calendar-looking prefixes worth handing to the date parsers, split by
/// field order.
static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<ymd>\d{4}[-/]\d{2}[-/]\d{2})|(?P<mdy>\d{1,2}/\d{1,2}/\d{2,4}))")
        .expect("Invalid date shape regex")
});

/// Numbers strictly inside this range are read as Unix epoch seconds
/// (2000-01-01 to 2038-01-19).
const EPOCH_SECONDS_MIN: f64 = 946_684_800.0;
const EPOCH_SECONDS_MAX: f64 = 2_147_483_647.0;

const TIMESTAMP_THRESHOLD: f64 = 0.7;
const BOOLEAN_THRESHOLD: f64 = 0.8;
const NUMBER_THRESHOLD: f64 = 0.8;

const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "1", "0", "yes", "no"];

const YMD_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];
const YMD_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

// Two-digit years first: `%Y` would also accept "24" as year 24.
const MDY_DATETIME_FORMATS: [&str; 4] = [
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
];
const MDY_DATE_FORMATS: [&str; 2] = ["%m/%d/%y", "%m/%d/%Y"];

/// Classifies a column from its cells.
///
/// Empty cells are ignored. Types are tried in the order timestamp (70%),
/// boolean (80%), number (80%); the first whose share of non-empty values
/// reaches its threshold wins and that share is the confidence. Otherwise the
/// column is a string column with confidence `1 - max(share)`.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> TypeInference {
    let mut total = 0usize;
    let mut timestamps = 0usize;
    let mut booleans = 0usize;
    let mut numbers = 0usize;

    for value in values {
        if value.is_empty() {
            continue;
        }
        total += 1;
        if is_timestamp_value(value) {
            timestamps += 1;
        }
        if is_boolean_value(value) {
            booleans += 1;
        }
        if is_number_value(value) {
            numbers += 1;
        }
    }

    if total == 0 {
        return TypeInference::empty();
    }

    let share = |count: usize| count as f64 / total as f64;
    let (timestamp, boolean, number) = (share(timestamps), share(booleans), share(numbers));

    if timestamp >= TIMESTAMP_THRESHOLD {
        TypeInference::new(ColumnType::Timestamp, timestamp)
    } else if boolean >= BOOLEAN_THRESHOLD {
        TypeInference::new(ColumnType::Boolean, boolean)
    } else if number >= NUMBER_THRESHOLD {
        TypeInference::new(ColumnType::Number, number)
    } else {
        TypeInference::new(ColumnType::String, 1.0 - timestamp.max(boolean).max(number))
    }
}

/// Boolean token check: `true/false/1/0/yes/no`, case-insensitive.
pub fn is_boolean_token(text: &str) -> bool {
    let text = text.trim();
    BOOLEAN_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(text))
}

/// Truth value of a boolean token, or `None` for anything else.
pub fn parse_boolean(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Strict finite number parse of trimmed text.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn in_epoch_window(value: f64) -> bool {
    value > EPOCH_SECONDS_MIN && value < EPOCH_SECONDS_MAX
}

fn is_timestamp_value(value: &CellValue) -> bool {
    match value {
        CellValue::Timestamp(_) => true,
        CellValue::Number(number) => in_epoch_window(*number),
        CellValue::Text(text) => parse_timestamp(text).is_some(),
        CellValue::Null | CellValue::Bool(_) => false,
    }
}

fn is_boolean_value(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(_) => true,
        CellValue::Text(text) => is_boolean_token(text),
        _ => false,
    }
}

fn is_number_value(value: &CellValue) -> bool {
    match value {
        CellValue::Number(number) => number.is_finite(),
        CellValue::Text(text) => parse_number(text).is_some(),
        _ => false,
    }
}

/// Parses a date/time string to UTC.
///
/// Accepts digit-only epoch seconds inside the plausible window, RFC 3339,
/// RFC 2822, and common `YYYY-MM-DD`, `YYYY/MM/DD` and `M/D/Y` layouts with
/// or without a time of day. Values without an offset are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        let seconds: i64 = text.parse().ok()?;
        if !in_epoch_window(seconds as f64) {
            return None;
        }
        return DateTime::from_timestamp(seconds, 0);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    let shape = DATE_SHAPE.captures(text)?;
    let (datetime_formats, date_formats): (&[&str], &[&str]) = if shape.name("ymd").is_some() {
        (YMD_DATETIME_FORMATS.as_slice(), YMD_DATE_FORMATS.as_slice())
    } else {
        (MDY_DATETIME_FORMATS.as_slice(), MDY_DATE_FORMATS.as_slice())
    };

    for format in datetime_formats {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Canonical ISO-8601 form of a timestamp cell, e.g. `2024-03-01T12:00:00.000Z`.
///
/// Numbers are Unix epoch seconds. Values that cannot be read as a date
/// return `None` and are left as they were by the caller.
pub fn normalize_timestamp(value: &CellValue) -> Option<String> {
    let parsed = match value {
        CellValue::Number(seconds) if seconds.is_finite() => {
            DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
        }
        CellValue::Text(text) | CellValue::Timestamp(text) => parse_timestamp(text),
        _ => None,
    }?;
    Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true))
}
