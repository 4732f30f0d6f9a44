//! Preamble stripping and delimiter detection for delimited text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Runs of two or more whitespace characters act as one delimiter.
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid multi-space regex"));

/// Number of non-empty lines sampled for delimiter detection.
const SAMPLE_LINES: usize = 10;

/// Comment excerpts are cut to this many characters.
const COMMENT_EXCERPT_CHARS: usize = 50;

/// Field delimiter candidates, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
    /// Two or more consecutive whitespace characters.
    MultiSpace,
}

impl Delimiter {
    pub const CANDIDATES: [Delimiter; 5] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::MultiSpace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
            Delimiter::MultiSpace => "multi-space",
        }
    }

    /// Single-byte delimiter, or `None` for the whitespace-run delimiter.
    pub fn as_byte(self) -> Option<u8> {
        match self {
            Delimiter::Comma => Some(b','),
            Delimiter::Semicolon => Some(b';'),
            Delimiter::Tab => Some(b'\t'),
            Delimiter::Pipe => Some(b'|'),
            Delimiter::MultiSpace => None,
        }
    }

    fn occurrences(self, line: &str) -> usize {
        match self {
            Delimiter::Comma => line.matches(',').count(),
            Delimiter::Semicolon => line.matches(';').count(),
            Delimiter::Tab => line.matches('\t').count(),
            Delimiter::Pipe => line.matches('|').count(),
            Delimiter::MultiSpace => MULTI_SPACE.find_iter(line).count(),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text with comment/metadata lines and blank lines removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedText {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Removes blank lines and lines starting with `#`, `//` or `*`.
///
/// Every removed comment line yields a warning with a short excerpt. Kept
/// lines lose only their trailing carriage return.
pub fn strip_preamble(raw: &str) -> CleanedText {
    let mut kept = Vec::new();
    let mut warnings = Vec::new();

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_comment(trimmed) {
            let excerpt: String = trimmed.chars().take(COMMENT_EXCERPT_CHARS).collect();
            warnings.push(format!("Skipped comment line: {excerpt}..."));
            continue;
        }
        kept.push(line);
    }

    CleanedText {
        text: kept.join("\n"),
        warnings,
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//") || line.starts_with('*')
}

/// Score of one delimiter candidate over the sampled lines.
///
/// `mean × consistency × bonus`, where consistency is
/// `1 − variance / max²` and the bonus is 1.2 when the mean is at least 2.
/// Candidates averaging fewer than one occurrence per line score zero.
fn delimiter_score(delimiter: Delimiter, lines: &[&str]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let counts: Vec<f64> = lines
        .iter()
        .map(|line| delimiter.occurrences(line) as f64)
        .collect();
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    if mean < 1.0 {
        return 0.0;
    }
    let max = counts.iter().copied().fold(0.0_f64, f64::max);
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    let consistency = if max > 0.0 {
        1.0 - variance / (max * max)
    } else {
        0.0
    };
    let bonus = if mean >= 2.0 { 1.2 } else { 1.0 };
    mean * consistency * bonus
}

/// Picks the most plausible field delimiter for `text`.
///
/// Samples the first ten non-empty lines. Ties and the all-zero case fall
/// back to comma.
pub fn detect_delimiter(text: &str) -> Delimiter {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let mut best = Delimiter::Comma;
    let mut best_score = 0.0;
    for candidate in Delimiter::CANDIDATES {
        let score = delimiter_score(candidate, &lines);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    tracing::debug!(delimiter = %best, score = best_score, "detected delimiter");
    best
}

/// Rewrites whitespace-run separated lines to use `separator` instead.
///
/// Each line is trimmed first so leading indentation does not create an
/// empty first field.
pub(crate) fn collapse_multi_space(text: &str, separator: char) -> String {
    let replacement = separator.to_string();
    text.lines()
        .map(|line| {
            MULTI_SPACE
                .replace_all(line.trim(), replacement.as_str())
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let cleaned = strip_preamble("# motor: K550\n\n// rig 2\ntime,thrust\r\n* note\n0,1\n");
        assert_eq!(cleaned.text, "time,thrust\n0,1");
        assert_eq!(cleaned.warnings.len(), 3);
        assert_eq!(cleaned.warnings[0], "Skipped comment line: # motor: K550...");
    }

    #[test]
    fn comment_excerpt_is_truncated() {
        let long = format!("#{}", "x".repeat(80));
        let cleaned = strip_preamble(&long);
        let expected = format!("Skipped comment line: #{}...", "x".repeat(49));
        assert_eq!(cleaned.warnings, vec![expected]);
    }

    #[test]
    fn kept_lines_keep_leading_tabs() {
        let cleaned = strip_preamble("a\tb\n\t2\n");
        assert_eq!(cleaned.text, "a\tb\n\t2");
    }

    #[test]
    fn detects_comma_for_consistent_fields() {
        let text = "time,thrust,pressure,temp\n0,1,2,3\n0.1,5,2,3\n";
        assert_eq!(detect_delimiter(text), Delimiter::Comma);
    }

    #[test]
    fn detects_semicolon() {
        let text = "time;thrust;pressure\n0,0;1,5;2\n0,1;5,5;2\n";
        assert_eq!(detect_delimiter(text), Delimiter::Semicolon);
    }

    #[test]
    fn detects_tab_and_pipe() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n"), Delimiter::Tab);
        assert_eq!(detect_delimiter("a|b|c\n1|2|3\n"), Delimiter::Pipe);
    }

    #[test]
    fn detects_multi_space() {
        let text = "time    thrust    pressure\n0.0     1.5       2\n0.1     9.0       3\n";
        assert_eq!(detect_delimiter(text), Delimiter::MultiSpace);
    }

    #[test]
    fn empty_and_delimiter_free_text_fall_back_to_comma() {
        assert_eq!(detect_delimiter(""), Delimiter::Comma);
        assert_eq!(detect_delimiter("thrust\n1\n2\n"), Delimiter::Comma);
    }

    #[test]
    fn score_penalises_inconsistent_counts() {
        let steady = ["a,b,c", "1,2,3"];
        let ragged = ["a,b,c", "1"];
        assert!(
            delimiter_score(Delimiter::Comma, &steady) > delimiter_score(Delimiter::Comma, &ragged)
        );
    }

    #[test]
    fn score_applies_bonus_at_two_occurrences() {
        let lines = ["a,b,c", "1,2,3"];
        let score = delimiter_score(Delimiter::Comma, &lines);
        assert!((score - 2.4).abs() < 1e-12);
    }

    #[test]
    fn collapse_multi_space_trims_and_replaces() {
        let collapsed = collapse_multi_space("  time   thrust\n0.0  1.5", '\u{1f}');
        assert_eq!(collapsed, "time\u{1f}thrust\n0.0\u{1f}1.5");
    }
}
