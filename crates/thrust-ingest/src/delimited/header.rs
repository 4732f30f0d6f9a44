//! Header normalization.

use std::collections::BTreeSet;

/// Normalizes a header value by trimming whitespace and a stray BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Makes header names non-empty and unique.
///
/// Empty names become `column_<n>` (1-based position); repeated names get a
/// `_2`, `_3`, … suffix. Each repair is reported in `warnings`.
pub fn repair_headers(raw: &[String], warnings: &mut Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, value) in raw.iter().enumerate() {
        let mut name = normalize_header(value);
        if name.is_empty() {
            name = format!("column_{}", idx + 1);
            warnings.push(format!(
                "Column {} has no header name; using '{name}'",
                idx + 1
            ));
        }
        if seen.contains(&name) {
            let base = name.clone();
            let mut suffix = 2usize;
            while seen.contains(&format!("{base}_{suffix}")) {
                suffix += 1;
            }
            name = format!("{base}_{suffix}");
            warnings.push(format!("Duplicate column '{base}' renamed to '{name}'"));
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
