//! Document rendering
//!
//! The orchestrator only sees [`DocumentRenderer`]. [`PdfRenderer`] writes a
//! single A4 page with lopdf: title, metadata line, justified body and a
//! footer carrying the document number. The page content stream is
//! Flate-compressed, so short-line bodies cost no more on disk than prose.

use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use docbatch_types::ContentRecord;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// Turns a content record into a file at `path`, replacing any existing file
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, path: &Path, content: &ContentRecord, document_number: u64) -> Result<()>;
}

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 16.0;
const META_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;
const FOOTER_SIZE: f32 = 8.0;

/// Courier glyphs are 600/1000 em wide
const BODY_CHAR_WIDTH: f32 = BODY_SIZE * 0.6;

/// Body characters that fit on one line
pub const BODY_LINE_CHARS: usize = (TEXT_WIDTH / BODY_CHAR_WIDTH) as usize;

/// Map text onto characters the standard fonts can show with WinAnsi encoding
pub fn to_win_ansi(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => mapped.push(' '),
            '\u{2018}' | '\u{2019}' => mapped.push('\''),
            '\u{201C}' | '\u{201D}' => mapped.push('"'),
            '\u{2013}' | '\u{2014}' => mapped.push('-'),
            '\u{2026}' => mapped.push_str("..."),
            ' '..='~' | '\u{A0}'..='\u{FF}' => mapped.push(c),
            '\n' => mapped.push('\n'),
            _ => mapped.push('?'),
        }
    }
    mapped
}

/// Bytes of a string produced by [`to_win_ansi`]
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

/// One laid-out body line
#[derive(Debug, Clone, PartialEq)]
pub struct BodyLine {
    pub text: String,
    /// Extra space per word gap, zero for the last line of a paragraph
    pub word_spacing: f32,
}

/// Greedy word wrap at `max_chars`; words longer than a line are split
pub fn wrap_paragraph(paragraph: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in paragraph.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
        if current_len + needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap and justify a body. Blank source lines are kept as empty lines.
pub fn layout_body(body: &str) -> Vec<BodyLine> {
    let mut laid_out = Vec::new();

    for source_line in to_win_ansi(body).split('\n') {
        let wrapped = wrap_paragraph(source_line, BODY_LINE_CHARS);
        if wrapped.is_empty() {
            laid_out.push(BodyLine { text: String::new(), word_spacing: 0.0 });
            continue;
        }

        let last = wrapped.len() - 1;
        for (i, text) in wrapped.into_iter().enumerate() {
            let gaps = text.matches(' ').count();
            let word_spacing = if i == last || gaps == 0 {
                0.0
            } else {
                let slack = TEXT_WIDTH - text.chars().count() as f32 * BODY_CHAR_WIDTH;
                // Two decimals keep the content stream compact
                ((slack / gaps as f32).max(0.0) * 100.0).round() / 100.0
            };
            laid_out.push(BodyLine { text, word_spacing });
        }
    }

    laid_out
}

/// Renders documents as single-page PDF files
#[derive(Debug, Default, Clone)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn text_line(font: &str, size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(latin1_bytes(&to_win_ansi(text)))]),
            Operation::new("ET", vec![]),
        ]
    }

    fn page_operations(&self, content: &ContentRecord, document_number: u64) -> Vec<Operation> {
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let metadata = format!("Generated: {} | Source: {}", generated_at, content.source_locator);
        let footer = format!("Document {:06}", document_number);

        let mut operations = Vec::new();
        operations.extend(Self::text_line("F2", TITLE_SIZE, MARGIN, PAGE_HEIGHT - MARGIN, &content.title));
        operations.extend(Self::text_line("F1", META_SIZE, MARGIN, PAGE_HEIGHT - MARGIN - 18.0, &metadata));

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F3".into(), BODY_SIZE.into()]));
        operations.push(Operation::new("TL", vec![BODY_LEADING.into()]));
        // `'` moves down one leading before showing, so start one line higher
        operations.push(Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - 30.0).into()]));
        let mut word_spacing = 0.0;
        for line in layout_body(&content.body) {
            if line.text.is_empty() {
                operations.push(Operation::new("T*", vec![]));
                continue;
            }
            if line.word_spacing != word_spacing {
                word_spacing = line.word_spacing;
                operations.push(Operation::new("Tw", vec![word_spacing.into()]));
            }
            operations.push(Operation::new("'", vec![Object::string_literal(latin1_bytes(&line.text))]));
        }
        operations.push(Operation::new("ET", vec![]));

        let footer_x = (PAGE_WIDTH - footer.len() as f32 * FOOTER_SIZE * 0.5) / 2.0;
        operations.extend(Self::text_line("F1", FOOTER_SIZE, footer_x, MARGIN / 2.0, &footer));
        operations
    }

    /// Build the PDF in memory
    pub fn build(&self, content: &ContentRecord, document_number: u64) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font = |doc: &mut Document, base: &str| {
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base,
                "Encoding" => "WinAnsiEncoding",
            })
        };
        let regular_id = font(&mut doc, "Helvetica");
        let bold_id = font(&mut doc, "Helvetica-Bold");
        let mono_id = font(&mut doc, "Courier");

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
                "F3" => mono_id,
            },
        });

        let page_content = Content {
            operations: self.page_operations(content, document_number),
        };
        let mut stream = Stream::new(dictionary! {}, page_content.encode()?);
        stream.compress()?;
        let content_id = doc.add_object(stream);

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, path: &Path, content: &ContentRecord, document_number: u64) -> Result<()> {
        let mut doc = self.build(content, document_number)?;
        doc.save(path)?;
        log::debug!("Rendered {} ({} body bytes)", path.display(), content.body.len());
        Ok(())
    }
}

/// Check PDF magic bytes
pub fn is_pdf(data: &[u8]) -> bool {
    data.len() >= 4 && data.starts_with(b"%PDF")
}
