//! Input types consumed from the PDF-reading collaborator.
//!
//! The engine never touches PDF bytes itself. A reader (PyMuPDF-style, pdfium,
//! mupdf, ...) hands over already-decoded text lines with font and position
//! metadata, the embedded outline if one exists, and the page's link
//! annotations. Everything downstream is derived from this snapshot.

use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// A merged text line: all spans on one visual line combined, with the
/// dominant font attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Line text as the reader decoded it.
    pub text: String,
    /// Dominant font size in points (weighted by character count).
    pub font_size: f32,
    /// Dominant font name (e.g., "NimbusRomNo9L-Medi").
    pub font_name: String,
    /// Whether any span in the line uses a bold face.
    pub bold: bool,
    /// Line bounding box in page points, top-left origin.
    pub bbox: Rect,
}

impl TextLine {
    pub fn new(text: impl Into<String>, font_size: f32, bold: bool, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: String::new(),
            bold,
            bbox,
        }
    }
}

/// A single page of reader output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// Text lines in reading order.
    pub lines: Vec<TextLine>,
}

impl PageContent {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(width: f32, height: f32, lines: Vec<TextLine>) -> Self {
        Self {
            width,
            height,
            lines,
        }
    }
}

/// An entry of the document's embedded outline (table of contents).
///
/// Outline entries carry a target page but no character offsets; the outline
/// strategy resolves them against the page's text lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub title: String,
    /// Nesting level, 1-based (1 = top level).
    pub level: u32,
    /// Target page index (0-based).
    pub page: usize,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, level: u32, page: usize) -> Self {
        Self {
            title: title.into(),
            level,
            page,
        }
    }
}

/// Destination of a link annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotationTarget {
    /// External URL.
    Uri { url: String },
    /// Plain in-document page jump.
    Page { page: usize },
    /// Named destination. LaTeX-produced PDFs use `cite.<key>` destinations
    /// for bibliography links, which is how author-year citations become
    /// detectable at all.
    Named { dest: String, page: usize },
}

/// A link annotation as the reader reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAnnotation {
    pub target: AnnotationTarget,
    /// Page the annotation sits on (0-based).
    pub page: usize,
    /// Clickable area in page points.
    pub bbox: Rect,
}

impl LinkAnnotation {
    pub fn new(target: AnnotationTarget, page: usize, bbox: Rect) -> Self {
        Self { target, page, bbox }
    }
}

/// Caller-supplied identity and reader-level metadata for the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Caller-supplied stable identifier (e.g., an arXiv id). Keys the
    /// persisted representation.
    pub id: String,
    /// Title from the reader's metadata dictionary, if any.
    pub title: Option<String>,
    /// Comma-separated author string from the reader's metadata, if any.
    pub author: Option<String>,
    /// Canonical URL for the document, if known.
    pub url: Option<String>,
}

/// The complete reader snapshot the pipeline consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfContent {
    pub pages: Vec<PageContent>,
    /// Embedded outline entries in document order; empty when the PDF has
    /// no outline.
    pub outline: Vec<OutlineEntry>,
    /// Link annotations across all pages.
    pub annotations: Vec<LinkAnnotation>,
    pub source: SourceInfo,
}

impl PdfContent {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self {
            pages,
            outline: Vec::new(),
            annotations: Vec::new(),
            source: SourceInfo::default(),
        }
    }

    pub fn with_outline(mut self, outline: Vec<OutlineEntry>) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<LinkAnnotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = source;
        self
    }
}
