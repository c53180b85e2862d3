//! Plain-text extraction from uploaded CV files.
//!
//! PDF goes through `pdf_extract`. DOCX is a zip container; the body text
//! lives in `word/document.xml` as `<w:t>` runs grouped into `<w:p>`
//! paragraphs.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::generation::generator::{GenerationError, MediaType, SourceDocument};

const DOCX_BODY_PART: &str = "word/document.xml";

/// Text runs, paragraph ends, tabs and breaks in WordprocessingML.
const DOCX_TOKEN_PATTERN: &str = r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:tab/>|<w:br/>";
/// Named and numeric XML character references.
const XML_ENTITY_PATTERN: &str = r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(lt|gt|quot|apos|amp));";

static DOCX_TOKENS: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
static XML_ENTITIES: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Extracts the text of `source`, off the async runtime.
pub async fn extract_source_text(source: &SourceDocument) -> Result<String, GenerationError> {
    let bytes = source.bytes.clone();
    let media_type = source.media_type;

    let text = tokio::task::spawn_blocking(move || match media_type {
        MediaType::Pdf => extract_pdf_text(&bytes),
        MediaType::Docx => extract_docx_text(&bytes),
    })
    .await
    .map_err(|e| GenerationError::Internal(e.into()))??;

    if text.trim().is_empty() {
        return Err(GenerationError::UnreadableDocument(
            "No readable text found in the uploaded document.".to_string(),
        ));
    }

    debug!(
        "Extracted {} chars from {} upload",
        text.len(),
        media_type.label()
    );
    Ok(text)
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, GenerationError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        GenerationError::UnreadableDocument(format!("Failed to read PDF document: {e}"))
    })
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, GenerationError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(unreadable_docx)?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(unreadable_docx)?
        .read_to_string(&mut xml)
        .map_err(unreadable_docx)?;

    docx_xml_to_text(&xml)
}

fn unreadable_docx(e: impl std::fmt::Display) -> GenerationError {
    GenerationError::UnreadableDocument(format!("Failed to read DOCX document: {e}"))
}

/// Compiles `pattern` on first use and hands out the cached regex.
fn cached_regex(
    cell: &'static OnceLock<Result<Regex, regex::Error>>,
    pattern: &str,
) -> Result<&'static Regex, GenerationError> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| GenerationError::Internal(e.clone().into()))
}

/// Flattens WordprocessingML into text: one line per paragraph, tabs and
/// line breaks kept.
fn docx_xml_to_text(xml: &str) -> Result<String, GenerationError> {
    let tokens = cached_regex(&DOCX_TOKENS, DOCX_TOKEN_PATTERN)?;

    let mut text = String::new();
    for caps in tokens.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&decode_entities(run.as_str())?),
            None => match &caps[0] {
                "<w:tab/>" => text.push('\t'),
                _ => text.push('\n'),
            },
        }
    }
    Ok(text)
}

/// Decodes character references in one pass, so `&amp;lt;` stays `&lt;`.
/// References to invalid code points are left as written.
fn decode_entities(s: &str) -> Result<String, GenerationError> {
    let entities = cached_regex(&XML_ENTITIES, XML_ENTITY_PATTERN)?;

    let decoded = entities.replace_all(s, |caps: &Captures| {
        let code_point = match (caps.get(1), caps.get(2)) {
            (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
            (_, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
            _ => None,
        };
        if let Some(c) = code_point.and_then(char::from_u32) {
            return c.to_string();
        }
        match caps.get(3).map(|m| m.as_str()) {
            Some("lt") => "<".to_string(),
            Some("gt") => ">".to_string(),
            Some("quot") => "\"".to_string(),
            Some("apos") => "'".to_string(),
            Some("amp") => "&".to_string(),
            _ => caps[0].to_string(),
        }
    });
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCX_BODY_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<w:document><w:body>
        <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
        <w:p><w:r><w:t xml:space="preserve">Engineer at </w:t></w:r><w:r><w:t>R&amp;D Labs</w:t></w:r></w:p>
        <w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>Rust</w:t></w:r></w:p>
    </w:body></w:document>"#;

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let text = extract_docx_text(&docx_with_body(BODY)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Jane Doe", "Engineer at R&D Labs", "Skills:\tRust"]);
    }

    #[test]
    fn test_numeric_character_references_are_decoded() {
        assert_eq!(
            decode_entities("2019&#8211;2021 &#x2019;s &#X41; &amp;lt; &#xD800;").unwrap(),
            "2019\u{2013}2021 \u{2019}s A &lt; &#xD800;"
        );
    }

    #[test]
    fn test_docx_runs_decode_numeric_references() {
        let body = "<w:document><w:body><w:p><w:r><w:t>Lead &#8211; R&amp;D</w:t></w:r></w:p></w:body></w:document>";
        let text = extract_docx_text(&docx_with_body(body)).unwrap();
        assert_eq!(text.trim_end(), "Lead \u{2013} R&D");
    }

    #[test]
    fn test_docx_without_body_part_is_unreadable() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_docx_text(&bytes),
            Err(GenerationError::UnreadableDocument(_))
        ));
    }

    #[test]
    fn test_non_zip_bytes_are_unreadable() {
        assert!(matches!(
            extract_docx_text(b"not a zip"),
            Err(GenerationError::UnreadableDocument(_))
        ));
    }

    #[test]
    fn test_garbage_pdf_is_unreadable() {
        assert!(matches!(
            extract_pdf_text(b"this is not a pdf"),
            Err(GenerationError::UnreadableDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_docx_is_rejected() {
        let source = SourceDocument {
            bytes: docx_with_body("<w:document><w:body><w:p></w:p></w:body></w:document>").into(),
            media_type: MediaType::Docx,
        };
        assert!(matches!(
            extract_source_text(&source).await,
            Err(GenerationError::UnreadableDocument(_))
        ));
    }
}
