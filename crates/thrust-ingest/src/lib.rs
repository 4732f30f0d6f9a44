//! Ingestion of static-fire sensor exports.
//!
//! Turns CSV, TSV and JSON files into a typed [`RawDataset`]:
//!
//! 1. bytes are decoded ([`decode`]),
//! 2. comment lines are stripped and the delimiter detected ([`structure`]),
//! 3. rows are parsed ([`delimited`], [`json`]) into an untyped [`RawTable`],
//! 4. column types are inferred and cells retyped ([`inference`], [`table`]).
//!
//! Problems that leave the data usable are collected as warnings on the
//! dataset. Problems that do not are returned as [`IngestError`].

pub mod decode;
pub mod delimited;
pub mod error;
pub mod format;
pub mod inference;
pub mod json;
pub mod roles;
pub mod structure;
pub mod table;

use std::path::Path;

use thrust_model::RawDataset;

pub use decode::{DecodedText, decode_text};
pub use error::{IngestError, Result};
pub use format::FileFormat;
pub use inference::{infer_column_type, normalize_timestamp, parse_timestamp};
pub use roles::detect_column_roles;
pub use structure::{CleanedText, Delimiter, detect_delimiter, strip_preamble};
pub use table::{RawTable, finalize};

/// Parses already-decoded text in the given format.
pub fn parse_text(text: &str, format: FileFormat) -> Result<RawDataset> {
    let table = match format {
        FileFormat::Csv => delimited::parse_delimited(text, None)?,
        FileFormat::Tsv => delimited::parse_delimited(text, Some(Delimiter::Tab))?,
        FileFormat::Json => json::parse_json(text)?,
    };
    Ok(finalize(table))
}

/// Parses file contents, picking the format from `name`'s extension.
pub fn parse_file(name: &str, bytes: &[u8]) -> Result<RawDataset> {
    let format = FileFormat::from_name(name)?;
    let decoded = decode_text(bytes);
    let mut dataset = parse_text(&decoded.text, format)?;
    if let Some(warning) = decoded.warning {
        dataset.warnings.insert(0, warning);
    }
    tracing::debug!(
        file = name,
        format = %format,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        warnings = dataset.warnings.len(),
        "parsed file"
    );
    Ok(dataset)
}

/// Reads and parses a file from disk.
pub fn read_file(path: &Path) -> Result<RawDataset> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    parse_file(&name, &bytes)
}
