//! Paragraph text from Word (.docx) documents
//!
//! A .docx file is a zip container; the body lives in `word/document.xml`.
//! Only paragraphs directly under `w:body` are read. Table cells, text boxes
//! and compatibility fallbacks are skipped.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use super::extract::ExtractionError;
use super::types::{CanonicalEmail, InputKind};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the document's paragraphs, joined with `\n` in document order.
pub fn parse_docx(raw: &[u8]) -> Result<CanonicalEmail, ExtractionError> {
    let xml = read_document_part(raw).map_err(parse_error)?;
    let paragraphs = paragraphs_from_xml(&xml).map_err(parse_error)?;
    Ok(CanonicalEmail::from_text(paragraphs.join("\n")))
}

fn parse_error(message: String) -> ExtractionError {
    ExtractionError::Parse {
        kind: InputKind::WordDocument,
        message,
    }
}

fn read_document_part(raw: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(raw))
        .map_err(|e| format!("not a word document container: {}", e))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {}: {}", DOCUMENT_PART, e))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("unreadable {}: {}", DOCUMENT_PART, e))?;
    Ok(xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_run = false;
    // Element nesting, so a paragraph counts only as a direct child of w:body
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Root of a subtree whose text is not part of the body (text boxes, fallbacks)
    let mut skip_depth: Option<usize> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(e) => {
                depth += 1;
                if skip_depth.is_some() {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"body" => body_depth = Some(depth),
                    b"txbxContent" | b"Fallback" => skip_depth = Some(depth),
                    b"p" if body_depth.is_some_and(|body| body + 1 == depth) => {
                        current = Some(String::new())
                    }
                    b"r" => in_run = true,
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if skip_depth.is_some() {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"p" if body_depth == Some(depth) => paragraphs.push(String::new()),
                    // Tab stops in paragraph properties share the name, only run tabs count
                    b"tab" if in_run => push_if_open(&mut current, "\t"),
                    b"br" | b"cr" if in_run => push_if_open(&mut current, "\n"),
                    _ => {}
                }
            }
            Event::Text(text) if in_text && skip_depth.is_none() => {
                let text = text
                    .unescape()
                    .map_err(|e| format!("bad text content: {}", e))?;
                push_if_open(&mut current, &text);
            }
            Event::End(e) => {
                if let Some(root) = skip_depth {
                    if root == depth {
                        skip_depth = None;
                    }
                    depth = depth.saturating_sub(1);
                    continue;
                }
                match e.local_name().as_ref() {
                    b"body" => body_depth = None,
                    b"p" if body_depth.is_some_and(|body| body + 1 == depth) => {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                    b"r" => in_run = false,
                    b"t" => in_text = false,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_if_open(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build a minimal .docx container around the given body XML.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"><w:body>{}</w:body></w:document>"#,
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn paragraph(text: &str) -> String {
        if text.is_empty() {
            "<w:p/>".to_string()
        } else {
            format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
        }
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let body = [paragraph("Hi"), paragraph(""), paragraph("Thanks")].concat();
        let email = parse_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(email.body(), "Hi\n\nThanks");
    }

    #[test]
    fn test_runs_and_entities_within_paragraph() {
        let body = r#"<w:p><w:r><w:t xml:space="preserve">Tom &amp; </w:t></w:r><w:r><w:tab/><w:t>Jerry</w:t></w:r></w:p><w:p><w:pPr><w:jc w:val="left"/></w:pPr></w:p>"#;
        let email = parse_docx(&docx_with_body(body)).unwrap();
        assert_eq!(email.body(), "Tom & \tJerry\n");
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            paragraph("Before"),
            paragraph("Cell"),
            paragraph("After")
        );
        let email = parse_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(email.body(), "Before\nAfter");
    }

    #[test]
    fn test_text_box_inside_run_keeps_outer_paragraph() {
        let text_box = "<w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent>";
        let body = format!(
            concat!(
                "<w:p><w:r><w:t>Dear Sam,</w:t></w:r>",
                "<w:r><w:pict><v:shape><v:textbox>{}</v:textbox></v:shape></w:pict></w:r>",
                "<w:r><w:t xml:space=\"preserve\"> thanks.</w:t></w:r></w:p>",
                "{}"
            ),
            text_box,
            paragraph("Bye")
        );
        let email = parse_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(email.body(), "Dear Sam, thanks.\nBye");
    }

    #[test]
    fn test_alternate_content_is_read_once_without_box_text() {
        let body = format!(
            concat!(
                "<w:p><w:r><w:t>Before </w:t></w:r><w:r><mc:AlternateContent>",
                "<mc:Choice Requires=\"wps\"><w:drawing><wps:txbx>{0}</wps:txbx></w:drawing></mc:Choice>",
                "<mc:Fallback><w:pict><v:textbox>{0}</v:textbox></w:pict></mc:Fallback>",
                "</mc:AlternateContent></w:r><w:r><w:t>after</w:t></w:r></w:p>"
            ),
            "<w:txbxContent><w:p><w:r><w:t>Shape text</w:t></w:r></w:p><w:p/></w:txbxContent>"
        );
        let email = parse_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(email.body(), "Before after");
    }

    #[test]
    fn test_corrupt_container_is_parse_error() {
        let err = parse_docx(b"definitely not a zip").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse {
                kind: InputKind::WordDocument,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Error reading DOCX file:"));
    }
}
