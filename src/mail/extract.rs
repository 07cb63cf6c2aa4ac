//! Turn uploaded bytes into a [`CanonicalEmail`]

use thiserror::Error;

use super::docx::parse_docx;
use super::parser::parse_eml;
use super::types::{CanonicalEmail, InputKind};

/// Input bytes that could not be turned into text.
///
/// The display form is what the user sees in place of the email body.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error reading TXT file: {0}")]
    Decode(String),
    #[error("Error reading {kind} file: {message}")]
    Parse { kind: InputKind, message: String },
}

/// Convert a file's bytes according to its declared kind. Pure; no I/O.
pub fn extract(raw: &[u8], kind: InputKind) -> Result<CanonicalEmail, ExtractionError> {
    let result = match kind {
        InputKind::PlainText => decode_plain_text(raw),
        InputKind::EmailContainer => parse_eml(raw),
        InputKind::WordDocument => parse_docx(raw),
    };

    match &result {
        Ok(email) => tracing::debug!(
            %kind,
            bytes = raw.len(),
            chars = email.body().chars().count(),
            "Extracted email text"
        ),
        Err(e) => tracing::warn!(%kind, "Extraction failed: {}", e),
    }

    result
}

fn decode_plain_text(raw: &[u8]) -> Result<CanonicalEmail, ExtractionError> {
    let text = std::str::from_utf8(raw).map_err(|e| ExtractionError::Decode(e.to_string()))?;
    Ok(CanonicalEmail::from_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_verbatim() {
        let raw = "Hello,\r\n\r\nPlease send the report. — Ravi\n".as_bytes();
        let email = extract(raw, InputKind::PlainText).unwrap();
        assert_eq!(email.body(), "Hello,\r\n\r\nPlease send the report. — Ravi\n");
        assert!(email.metadata().is_empty());
    }

    #[test]
    fn test_plain_text_invalid_utf8_is_decode_error() {
        let err = extract(&[0x48, 0x69, 0xff, 0xfe], InputKind::PlainText).unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
        assert!(err.to_string().starts_with("Error reading TXT file:"));
    }

    #[test]
    fn test_dispatch_by_kind() {
        let eml = b"From: a@example.com\r\nSubject: Hi\r\n\r\nBody";
        let email = extract(eml, InputKind::EmailContainer).unwrap();
        assert!(email.body().starts_with("From: a@example.com\nSubject: Hi\n"));

        let docx = crate::mail::docx::tests::docx_with_body(
            "<w:p><w:r><w:t>From a document</w:t></w:r></w:p>",
        );
        let email = extract(&docx, InputKind::WordDocument).unwrap();
        assert_eq!(email.body(), "From a document");
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = extract(b"PK\x03\x04garbage", InputKind::WordDocument).unwrap_err();
        assert!(err.to_string().starts_with("Error reading DOCX file: "));
    }
}
