//! Error types for data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a single file unusable.
///
/// Each variant is fatal for the file it came from only; batch callers record
/// it and move on to the next file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Format Errors ===
    /// File extension is not csv, tsv or json.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    // === Delimited Text Errors ===
    /// Structural CSV/TSV failure.
    #[error(
        "failed to parse CSV/TSV: {message}. Try checking for mixed delimiters, quoted strings, or malformed rows."
    )]
    Parse { message: String },

    // === JSON Errors ===
    /// JSON syntax error.
    #[error("failed to parse JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// JSON is well-formed but not an array of flat records or a single flat record.
    #[error("invalid JSON structure: {message}")]
    Validation { message: String },

    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            extension: ".xlsx".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file format: .xlsx");
    }

    #[test]
    fn test_parse_error_lists_likely_causes() {
        let err = IngestError::parse("unterminated quoted field");
        let message = err.to_string();
        assert!(message.starts_with("failed to parse CSV/TSV: unterminated quoted field."));
        assert!(message.contains("mixed delimiters"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let ingest_err: IngestError = json_err.into();
        assert!(matches!(ingest_err, IngestError::Json { .. }));
    }
}
