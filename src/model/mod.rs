//! Data model for structured documents.
//!
//! Everything here is serializable: the assembled [`Document`] is cached as a
//! JSON object graph and re-loaded across invocations without re-parsing, so
//! schema stability matters.

mod document;
mod geometry;
mod highlight;
mod layout;
mod link;
mod section;

pub use document::{
    Document, HeadingSource, JsonFormat, Metadata, NoteStage, PageDims, QualityNote,
};
pub use geometry::{PageBox, Rect, ScaledBox, Span};
pub use highlight::{Highlight, HighlightColor, HighlightSet};
pub use layout::{order_and_label, LayoutDetector, LayoutElement, LayoutKind};
pub use link::{Link, LinkAnchor, LinkKind, LinkTarget};
pub use section::{walk_sections, Section, Sentence};
