//! Input format selection from file names.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    /// Tab-separated; delimiter detection is skipped.
    Tsv,
    Json,
}

impl FileFormat {
    /// Picks the format from the last `.` segment of `name`, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "tsv" => Ok(FileFormat::Tsv),
            "json" => Ok(FileFormat::Json),
            _ => Err(IngestError::UnsupportedFormat {
                extension: format!(".{extension}"),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Tsv => "tsv",
            FileFormat::Json => "json",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
