use std::io::{Cursor, Read};

use quick_xml::events::Event;
use scraper::{Html, Selector};

use crate::error::ExtractError;
use crate::models::{Document, DocumentFormat};

const MAX_DOCX_XML_BYTES: u64 = 50 * 1024 * 1024;

pub fn extract_document_text(document: &Document) -> Result<String, ExtractError> {
    match document.format() {
        DocumentFormat::Pdf => extract_pdf_text(document.bytes()),
        DocumentFormat::Docx => extract_docx_text(document.bytes()),
    }
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|error| ExtractError::Pdf(error.to_string()))?;

    let mut text = String::new();
    for (page_no, _page_id) in document.get_pages() {
        let page_text = document
            .extract_text(&[page_no])
            .map_err(|error| ExtractError::Pdf(error.to_string()))?;
        text.push_str(&page_text);
    }

    Ok(text.trim().to_string())
}

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|error| ExtractError::Docx(error.to_string()))?;

    let entry = archive
        .by_name("word/document.xml")
        .map_err(|error| ExtractError::Docx(format!("word/document.xml: {error}")))?;

    let mut xml = Vec::new();
    let mut bounded = entry.take(MAX_DOCX_XML_BYTES + 1);
    bounded
        .read_to_end(&mut xml)
        .map_err(|error| ExtractError::Docx(error.to_string()))?;
    if xml.len() as u64 > MAX_DOCX_XML_BYTES {
        return Err(ExtractError::Docx(format!(
            "word/document.xml exceeds the {MAX_DOCX_XML_BYTES} byte cap"
        )));
    }

    document_xml_paragraphs(&xml)
}

// Streams word/document.xml, accumulating <w:t> runs per <w:p> paragraph.
// Paragraphs whose text is blank are dropped; the rest join with newlines.
fn document_xml_paragraphs(xml: &[u8]) -> Result<String, ExtractError> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => match element.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" if in_paragraph => in_run_text = true,
                _ => {}
            },
            Ok(Event::Text(text)) if in_run_text => {
                let value = text
                    .unescape()
                    .map_err(|error| ExtractError::Docx(error.to_string()))?;
                current.push_str(&value);
            }
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    in_paragraph = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(error) => return Err(ExtractError::Docx(error.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

/// Text of every `<p>` element joined by single spaces; everything outside a
/// paragraph element (scripts, headers, tables) is discarded.
pub fn html_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(paragraph) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&paragraph)
        .map(|element| element.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
