//! CSV/TSV and other delimited text parsing.

mod header;
mod reader;

pub use header::{normalize_header, repair_headers};
pub use reader::parse_delimited;
