use mail_parser::{
    Addr, Address, HeaderName, Message, MessageParser, MessagePart, MimeHeaders, PartType,
};

use super::extract::ExtractionError;
use super::types::{CanonicalEmail, EmailMetadata, InputKind};
use crate::constants::{NO_DATE, NO_SUBJECT, UNKNOWN_SENDER};

/// Parse an internet message into its canonical form.
///
/// The body is prefixed with `From:`, `Subject:` and `Date:` lines so that the
/// header context survives into the prompts.
pub fn parse_eml(raw: &[u8]) -> Result<CanonicalEmail, ExtractionError> {
    let message = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| ExtractionError::Parse {
            kind: InputKind::EmailContainer,
            message: "not a valid internet message".to_string(),
        })?;

    // Parsed values first; a header that is present but unparseable is echoed raw
    let metadata = EmailMetadata {
        sender: message
            .from()
            .map(format_addresses)
            .filter(|s| !s.is_empty())
            .or_else(|| raw_header(&message, HeaderName::From)),
        subject: message
            .subject()
            .map(|s| s.to_string())
            .or_else(|| raw_header(&message, HeaderName::Subject)),
        date: message
            .date()
            .map(|d| d.to_rfc822())
            .or_else(|| raw_header(&message, HeaderName::Date)),
    };

    let text = extract_plain_body(&message);

    let body = format!(
        "From: {}\nSubject: {}\nDate: {}\n\n{}",
        metadata.sender.as_deref().unwrap_or(UNKNOWN_SENDER),
        metadata.subject.as_deref().unwrap_or(NO_SUBJECT),
        metadata.date.as_deref().unwrap_or(NO_DATE),
        text
    );

    Ok(CanonicalEmail::with_metadata(body, metadata))
}

fn format_addresses(address: &Address) -> String {
    address
        .iter()
        .filter_map(format_addr)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_addr(addr: &Addr) -> Option<String> {
    match (addr.name(), addr.address()) {
        (Some(name), Some(address)) => Some(format!("{} <{}>", name, address)),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(address)) => Some(address.to_string()),
        (None, None) => None,
    }
}

/// Header value as written, with folding collapsed. `None` when absent or blank.
fn raw_header<'x>(message: &Message<'x>, name: HeaderName<'x>) -> Option<String> {
    let value = message
        .header_raw(name)?
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!value.is_empty()).then_some(value)
}

/// First `text/plain` part of a multipart message, or the single payload
/// otherwise. Multipart messages without a plain part yield empty text.
fn extract_plain_body(message: &Message) -> String {
    let Some(root) = message.parts.first() else {
        return String::new();
    };

    if !matches!(root.body, PartType::Multipart(_)) {
        return part_text(root).unwrap_or_default();
    }

    message
        .parts
        .iter()
        .skip(1)
        .filter(|part| is_plain_text(part))
        .find_map(part_text)
        .unwrap_or_default()
}

fn is_plain_text(part: &MessagePart) -> bool {
    match part.content_type() {
        Some(ct) => {
            ct.ctype().eq_ignore_ascii_case("text")
                && ct.subtype().is_some_and(|s| s.eq_ignore_ascii_case("plain"))
        }
        // No Content-Type inside a multipart defaults to text/plain
        None => matches!(part.body, PartType::Text(_)),
    }
}

fn part_text(part: &MessagePart) -> Option<String> {
    match &part.body {
        PartType::Text(text) => Some(text.to_string()),
        PartType::Html(html) => Some(html.to_string()),
        PartType::Binary(bytes) | PartType::InlineBinary(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        PartType::Message(_) | PartType::Multipart(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_email() {
        let raw = b"From: Jane Doe <jane@example.com>\r\n\
                    To: me@example.com\r\n\
                    Subject: Quarterly review\r\n\
                    Date: Mon, 1 Jan 2024 12:00:00 +0000\r\n\
                    \r\n\
                    Can we meet on Thursday?";

        let email = parse_eml(raw).unwrap();
        let meta = email.metadata();
        assert_eq!(meta.sender.as_deref(), Some("Jane Doe <jane@example.com>"));
        assert_eq!(meta.subject.as_deref(), Some("Quarterly review"));
        assert!(meta.date.is_some());

        let mut lines = email.body().lines();
        assert_eq!(lines.next(), Some("From: Jane Doe <jane@example.com>"));
        assert_eq!(lines.next(), Some("Subject: Quarterly review"));
        assert!(lines.next().unwrap().starts_with("Date: "));
        assert_eq!(lines.next(), Some(""));
        assert!(email.body().ends_with("Can we meet on Thursday?"));
    }

    #[test]
    fn test_multipart_prefers_plain_part() {
        let raw = b"From: sender@example.com\r\n\
                    Subject: Options\r\n\
                    MIME-Version: 1.0\r\n\
                    Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
                    \r\n\
                    --XYZ\r\n\
                    Content-Type: text/plain; charset=utf-8\r\n\
                    \r\n\
                    Plain version of the message.\r\n\
                    --XYZ\r\n\
                    Content-Type: text/html; charset=utf-8\r\n\
                    \r\n\
                    <html><body><p>HTML version</p></body></html>\r\n\
                    --XYZ--\r\n";

        let email = parse_eml(raw).unwrap();
        assert!(email.body().contains("Plain version of the message."));
        assert!(!email.body().contains("HTML version"));
    }

    #[test]
    fn test_html_first_still_picks_plain() {
        let raw = b"From: sender@example.com\r\n\
                    Subject: Reordered\r\n\
                    MIME-Version: 1.0\r\n\
                    Content-Type: multipart/mixed; boundary=\"B\"\r\n\
                    \r\n\
                    --B\r\n\
                    Content-Type: text/html\r\n\
                    \r\n\
                    <b>bold html</b>\r\n\
                    --B\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    plain after html\r\n\
                    --B--\r\n";

        let email = parse_eml(raw).unwrap();
        assert!(email.body().contains("plain after html"));
        assert!(!email.body().contains("bold html"));
    }

    #[test]
    fn test_unparseable_date_is_kept_as_written() {
        let raw = b"From: Jane <jane@example.com>\r\n\
                    Subject: Planning\r\n\
                    Date: Tuesday next week\r\n\
                    \r\n\
                    See you then.";

        let email = parse_eml(raw).unwrap();
        assert_eq!(email.metadata().date.as_deref(), Some("Tuesday next week"));
        assert!(email.body().contains("\nDate: Tuesday next week\n\n"));
    }

    #[test]
    fn test_every_sender_is_listed() {
        let raw = b"From: a@example.com, Bea <b@example.com>\r\n\
                    Subject: Joint request\r\n\
                    \r\n\
                    Please advise.";

        let email = parse_eml(raw).unwrap();
        assert!(
            email
                .body()
                .starts_with("From: a@example.com, Bea <b@example.com>\n")
        );
    }

    #[test]
    fn test_invalid_utf8_body_is_replaced() {
        let raw = b"From: sender@example.com\r\n\
                    Subject: Bytes\r\n\
                    Content-Type: text/plain; charset=utf-8\r\n\
                    \r\n\
                    Hi \xff\xfe there";

        let email = parse_eml(raw).unwrap();
        assert!(email.body().ends_with("there"));
        assert!(email.body().contains('\u{FFFD}'));
        assert!(email.body().contains("Hi "));
    }

    #[test]
    fn test_missing_headers_use_placeholders() {
        let raw = b"X-Mailer: test\r\n\r\nJust a body.";

        let email = parse_eml(raw).unwrap();
        assert!(email.metadata().is_empty());
        assert!(email.body().starts_with(
            "From: Unknown Sender\nSubject: No Subject\nDate: No Date\n\n"
        ));
        assert!(email.body().ends_with("Just a body."));
    }
}
