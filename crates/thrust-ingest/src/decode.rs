//! Byte-to-text decoding at the file boundary.

use encoding_rs::{Encoding, WINDOWS_1252};

/// Decoded file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub warning: Option<String>,
}

/// Decodes raw file bytes.
///
/// - A UTF-8 or UTF-16 byte-order mark selects that encoding and is removed.
/// - Otherwise the bytes must be UTF-8; if they are not, they are decoded as
///   Windows-1252 and a warning is attached.
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        let warning = had_errors.then(|| {
            format!(
                "File contains bytes that are not valid {}; they were replaced",
                encoding.name()
            )
        });
        return DecodedText {
            text: text.into_owned(),
            warning,
        };
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text: text.to_string(),
            warning: None,
        },
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            tracing::debug!("input is not UTF-8, falling back to windows-1252");
            DecodedText {
                text: text.into_owned(),
                warning: Some("File is not valid UTF-8; decoded as Windows-1252".to_string()),
            }
        }
    }
}
