//! # paperstruct
//!
//! Document-structure extraction for academic papers.
//!
//! Given a reader snapshot of a PDF (text lines with font and position
//! information, the embedded outline, and link annotations), this library
//! recovers the paper's logical structure: a section tree with sentence
//! spans, external links and citations anchored into that tree, coordinate
//! mapping between character spans and page geometry, and stable reference
//! ids for every addressable piece.
//!
//! ## Quick Start
//!
//! ```
//! use paperstruct::input::{PageContent, PdfContent, TextLine};
//! use paperstruct::model::Rect;
//!
//! fn main() -> paperstruct::Result<()> {
//!     let pages = vec![PageContent::with_lines(
//!         612.0,
//!         792.0,
//!         vec![TextLine::new(
//!             "A very small document.",
//!             11.0,
//!             false,
//!             Rect::new(72.0, 100.0, 540.0, 111.0),
//!         )],
//!     )];
//!     let doc = paperstruct::parse(&PdfContent::new(pages))?;
//!
//!     assert_eq!(doc.page_count(), 1);
//!     for section in doc.walk_sections() {
//!         println!("{} ({} sentences)", section.heading, section.sentences.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two heading strategies**: the embedded outline when usable, font
//!   heuristics otherwise, never blended, always reported
//! - **Section tree**: level-aware segmentation with per-section sentence
//!   spans into one flat document text
//! - **Links and citations**: URL annotations, in-document jumps, numeric
//!   and hyperlinked author-year citation markers
//! - **Coordinate mapping**: spans to page boxes and back, plus free-text
//!   search with geometry
//! - **Stable refs**: deterministic ids ("s2", "c5", "f1") for sections,
//!   links, and layout elements
//! - **Deterministic output**: identical input bytes give identical
//!   documents, ids included

pub mod error;
pub mod input;
pub mod mapper;
pub mod model;
pub mod parser;
pub mod registry;

// Re-export commonly used types
pub use error::{Error, Result};
pub use input::{
    AnnotationTarget, LinkAnnotation, OutlineEntry, PageContent, PdfContent, SourceInfo, TextLine,
};
pub use mapper::{CoordinateMapper, TextMatch};
pub use model::{
    Document, HeadingSource, Highlight, HighlightColor, HighlightSet, JsonFormat, LayoutDetector,
    LayoutElement, LayoutKind, Link, LinkAnchor, LinkKind, LinkTarget, Metadata, NoteStage,
    PageBox, PageDims, QualityNote, Rect, ScaledBox, Section, Sentence, Span,
};
pub use parser::ParseOptions;
pub use registry::{RefEntry, RefRegistry, RefTarget};

/// Parse a reader snapshot with default options.
pub fn parse(content: &PdfContent) -> Result<Document> {
    parse_with_options(content, &ParseOptions::default())
}

/// Parse a reader snapshot with explicit options.
pub fn parse_with_options(content: &PdfContent, options: &ParseOptions) -> Result<Document> {
    parser::pipeline::run(content, options, None)
}

/// Parse and additionally run a layout detector, folding its elements into
/// the document in detection order.
pub fn parse_with_detector(
    content: &PdfContent,
    options: &ParseOptions,
    detector: &dyn LayoutDetector,
) -> Result<Document> {
    parser::pipeline::run(content, options, Some(detector))
}
