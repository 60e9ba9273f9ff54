//! PDF report: a pure layout pass that places every line on A4 pages, then a thin
//! `printpdf` encoder.

use crate::domain::model::Record;
use crate::utils::error::{Result, ScrapeError};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

pub const DEFAULT_TITLE: &str = "Hyderabad Architecture & Interior Design Firms";

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const SIDE_MARGIN_MM: f32 = 10.0;
pub const TOP_MARGIN_MM: f32 = 10.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

const TITLE_FONT_PT: f32 = 14.0;
const BODY_FONT_PT: f32 = 10.0;
const TITLE_LINE_MM: f32 = 10.0;
const BODY_LINE_MM: f32 = 8.0;
const AFTER_TITLE_MM: f32 = 5.0;
const BETWEEN_RECORDS_MM: f32 = 2.0;

const PT_TO_MM: f32 = 0.352_8;
// Helvetica 平均字寬約 0.5 em
const AVG_CHAR_EM: f32 = 0.5;

// cp1252 0x80..0x9F 區段中有字形的字元
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";
pub const REPLACEMENT_CHAR: char = '?';

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    /// Top of the line box, measured from the top edge of the page.
    pub y_mm: f32,
    pub height_mm: f32,
    pub font_size_pt: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<TextLine>,
}

/// The text lines of one numbered record block, before wrapping.
pub fn record_lines(index: usize, record: &Record) -> Vec<String> {
    vec![
        format!("{}. {}", index + 1, record.name),
        format!("Address: {}", record.address),
        format!("Email: {}", record.email),
        format!("Phone: {}", record.phone),
        format!("Website: {}", record.website),
        format!("Category: {}", record.category),
        format!("Description: {}", record.description),
    ]
}

/// Whether the built-in Helvetica fonts (WinAnsi encoding) can draw `c`.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(c)
}

/// Replaces every character the built-in fonts cannot draw with `?`, one for one.
/// Returns the cleaned text and how many characters were replaced.
pub fn to_win_ansi(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let cleaned = text
        .chars()
        .map(|c| {
            if is_win_ansi(c) {
                c
            } else {
                replaced += 1;
                REPLACEMENT_CHAR
            }
        })
        .collect();
    (cleaned, replaced)
}

pub fn estimate_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * AVG_CHAR_EM * PT_TO_MM
}

/// Word-wraps `text` to at most `max_chars` per line; words longer than a line are split.
pub fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: TOP_MARGIN_MM,
        }
    }

    fn place(&mut self, text: String, x_mm: f32, height_mm: f32, font_size_pt: f32, bold: bool) {
        if self.y + height_mm > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            self.pages.push(PageLayout::default());
            self.y = TOP_MARGIN_MM;
        }
        let y_mm = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                text,
                x_mm,
                y_mm,
                height_mm,
                font_size_pt,
                bold,
            });
        }
        self.y += height_mm;
    }

    fn skip(&mut self, mm: f32) {
        self.y += mm;
    }
}

pub fn layout_report(records: &[Record], title: &str) -> Vec<PageLayout> {
    let printable = PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM;
    let max_chars = (printable / (BODY_FONT_PT * AVG_CHAR_EM * PT_TO_MM)).floor() as usize;

    let mut cursor = Cursor::new();

    let (title, replaced) = to_win_ansi(title);
    if replaced > 0 {
        tracing::warn!("Report title has {} unprintable characters, replaced with '?'", replaced);
    }
    let title_x = SIDE_MARGIN_MM
        + ((printable - estimate_width_mm(&title, TITLE_FONT_PT)) / 2.0).max(0.0);
    cursor.place(title, title_x, TITLE_LINE_MM, TITLE_FONT_PT, true);
    cursor.skip(AFTER_TITLE_MM);

    for (idx, record) in records.iter().enumerate() {
        let mut replaced = 0;
        let lines: Vec<String> = record_lines(idx, record)
            .iter()
            .map(|line| {
                let (cleaned, count) = to_win_ansi(line);
                replaced += count;
                cleaned
            })
            .collect();
        if replaced > 0 {
            tracing::warn!(
                "Entry {} ({}): {} characters outside the PDF font's range, replaced with '?'",
                idx + 1,
                record.name,
                replaced
            );
        }

        for line in lines {
            for wrapped in wrap_line(&line, max_chars) {
                cursor.place(wrapped, SIDE_MARGIN_MM, BODY_LINE_MM, BODY_FONT_PT, false);
            }
        }
        cursor.skip(BETWEEN_RECORDS_MM);
    }

    cursor.pages
}

fn render_error(e: impl std::fmt::Debug) -> ScrapeError {
    ScrapeError::RenderError {
        message: format!("{:?}", e),
    }
}

pub fn encode_pdf(pages: &[PageLayout], title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_error)?;

    for (idx, page) in pages.iter().enumerate() {
        let layer = if idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    doc.save_to_bytes().map_err(render_error)
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &PageLayout,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for line in &page.lines {
        // PDF 原點在左下角
        let baseline = PAGE_HEIGHT_MM - line.y_mm - line.height_mm * 0.7;
        let font = if line.bold { bold } else { regular };
        layer.use_text(
            line.text.as_str(),
            line.font_size_pt,
            Mm(line.x_mm),
            Mm(baseline),
            font,
        );
    }
}

/// Lays out and encodes the whole report.
pub fn render_report(records: &[Record], title: &str) -> Result<Vec<u8>> {
    let pages = layout_report(records, title);
    tracing::debug!(
        "Report layout: {} records on {} pages",
        records.len(),
        pages.len()
    );
    encode_pdf(&pages, title)
}
