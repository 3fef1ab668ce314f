//! The text map: a deterministic flattening of reader output into one text
//! buffer plus per-line offsets and geometry.
//!
//! Every later stage (heading detection, section segmentation, link
//! anchoring, the coordinate mapper) addresses text through this map, which
//! is what keeps all derived spans consistent with a single `raw_text`.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::input::PdfContent;
use crate::model::{PageDims, Rect, Span};

/// A text line bound to its offsets in `raw_text`.
#[derive(Debug, Clone)]
pub struct MappedLine {
    /// Offsets of the line's text in `raw_text` (excludes the joining
    /// newline).
    pub span: Span,
    /// Page index (0-based).
    pub page: usize,
    pub bbox: Rect,
    pub font_size: f32,
    pub bold: bool,
}

/// Flat text buffer plus line offsets and page geometry.
#[derive(Debug, Clone)]
pub struct TextMap {
    pub raw_text: String,
    pub lines: Vec<MappedLine>,
    pub pages: Vec<PageDims>,
}

impl TextMap {
    /// Build the map from reader output.
    ///
    /// Line text is NFC-normalized and whitespace-collapsed, then lines are
    /// joined with `\n`. Blank lines are dropped. Identical input always
    /// yields an identical map.
    ///
    /// Fatal when the input has no pages or no non-empty text lines; a
    /// scanned/image-only document cannot be structured.
    pub fn build(content: &PdfContent) -> Result<TextMap> {
        if content.pages.is_empty() {
            return Err(Error::EmptyDocument("input has no pages".to_string()));
        }

        let whitespace = Regex::new(r"\s+").expect("valid regex");

        let mut raw_text = String::new();
        let mut lines = Vec::new();

        for (page_idx, page) in content.pages.iter().enumerate() {
            for line in &page.lines {
                let normalized: String = line.text.nfc().collect();
                let collapsed = whitespace.replace_all(normalized.trim(), " ");
                if collapsed.is_empty() {
                    continue;
                }
                if !raw_text.is_empty() {
                    raw_text.push('\n');
                }
                let start = raw_text.len();
                raw_text.push_str(&collapsed);
                lines.push(MappedLine {
                    span: Span::new(start, raw_text.len()),
                    page: page_idx,
                    bbox: line.bbox,
                    font_size: line.font_size,
                    bold: line.bold,
                });
            }
        }

        if lines.is_empty() {
            return Err(Error::EmptyDocument(
                "no extractable text lines".to_string(),
            ));
        }

        let pages = content
            .pages
            .iter()
            .enumerate()
            .map(|(i, p)| PageDims {
                page_number: i,
                width: p.width,
                height: p.height,
            })
            .collect();

        Ok(TextMap {
            raw_text,
            lines,
            pages,
        })
    }

    /// Text of a mapped line.
    pub fn line_text(&self, line: &MappedLine) -> &str {
        line.span.slice(&self.raw_text)
    }

    /// Lines on the given page, in document order.
    pub fn lines_on_page(&self, page: usize) -> impl Iterator<Item = &MappedLine> {
        self.lines.iter().filter(move |l| l.page == page)
    }

    /// Page containing the given text offset (the page of the last line
    /// starting at or before it).
    pub fn page_of_offset(&self, offset: usize) -> usize {
        let idx = self.lines.partition_point(|l| l.span.start <= offset);
        if idx == 0 {
            self.lines.first().map(|l| l.page).unwrap_or(0)
        } else {
            self.lines[idx - 1].page
        }
    }

    /// Dimensions of a page.
    pub fn page_dims(&self, page: usize) -> Result<&PageDims> {
        self.pages
            .get(page)
            .ok_or(Error::PageOutOfRange(page, self.pages.len()))
    }

    /// Offset of the first line on `page` (or on the nearest following page
    /// with text; `None` past the last text line).
    pub fn page_start_offset(&self, page: usize) -> Option<usize> {
        self.lines
            .iter()
            .find(|l| l.page >= page)
            .map(|l| l.span.start)
    }
}
