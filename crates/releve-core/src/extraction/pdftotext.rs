use crate::error::ReleveError;
use crate::extraction::{PageWords, WordExtractor};
use crate::model::PositionedWord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// Word extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout`, which nests words in lines and lines in
/// blocks. Block and line positions in that tree become the word's line key.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor for PdftotextExtractor {
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ReleveError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ReleveError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ReleveError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ReleveError::PdftotextNotFound
                } else {
                    ReleveError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ReleveError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        parse_bbox_xml(&xml)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Partially read `<word>` element.
struct PendingWord {
    x: f32,
    y: f32,
    text: String,
}

fn parse_bbox_xml(xml: &str) -> Result<Vec<PageWords>, ReleveError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageWords> = Vec::new();
    let mut block: u32 = 0;
    let mut line: u32 = 0;
    let mut word: Option<PendingWord> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ReleveError::Extraction(format!("malformed bbox XML: {e}")))?;

        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => {
                    pages.push(PageWords {
                        page_number: pages.len() + 1,
                        words: Vec::new(),
                    });
                    block = 0;
                    line = 0;
                }
                b"block" => {
                    block += 1;
                    line = 0;
                }
                b"line" => line += 1,
                b"word" => {
                    word = Some(PendingWord {
                        x: attr_f32(&tag, b"xMin")?,
                        y: attr_f32(&tag, b"yMin")?,
                        text: String::new(),
                    });
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some(w) = word.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ReleveError::Extraction(format!("bad word text: {e}")))?;
                    w.text.push_str(&unescaped);
                }
            }
            Event::End(tag) if tag.name().as_ref() == b"word" => {
                if let (Some(w), Some(page)) = (word.take(), pages.last_mut()) {
                    let text = w.text.trim();
                    if !text.is_empty() {
                        page.words
                            .push(PositionedWord::new(w.x, w.y, block, line, text));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f32(tag: &BytesStart<'_>, name: &[u8]) -> Result<f32, ReleveError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| ReleveError::Extraction(format!("bad attribute: {e}")))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| ReleveError::Extraction(format!("bad attribute value: {e}")))?;
            return value.trim().parse().map_err(|_| {
                ReleveError::Extraction(format!(
                    "attribute {} is not a number: '{}'",
                    String::from_utf8_lossy(name),
                    value
                ))
            });
        }
    }
    Err(ReleveError::Extraction(format!(
        "word without {} attribute",
        String::from_utf8_lossy(name)
    )))
}
