//! Document-level types and the persistence surface.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::section::walk_sections;
use super::{LayoutElement, Link, Section, Span};
use crate::error::{Error, Result};

/// Which heading-detection strategy produced the section structure.
///
/// Exactly one strategy's output is ever used; consumers use this for
/// confidence reporting (outline-derived structure is more trustworthy than
/// font heuristics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingSource {
    /// Headings resolved from the embedded outline.
    Outline,
    /// Headings derived from font-size/style statistics.
    FontHeuristic,
    /// No headings found at all; the document is a single section.
    None,
}

/// Pipeline stage a quality note originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStage {
    Outline,
    HeadingDetection,
    Links,
}

/// A non-fatal, degraded-result record.
///
/// Heuristic shortfalls (an outline entry that matched no page line, a
/// heading candidate rejected by a filter, a dropped link) do not abort the
/// pipeline; they are surfaced here instead of being silently patched over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityNote {
    pub stage: NoteStage,
    pub detail: String,
    pub page: Option<usize>,
}

impl QualityNote {
    pub fn new(stage: NoteStage, detail: impl Into<String>, page: Option<usize>) -> Self {
        Self {
            stage,
            detail: detail.into(),
            page,
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
    /// Caller-supplied document identifier (e.g., an arXiv id).
    pub source_id: String,
    pub url: String,
}

/// Page dimensions recorded at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDims {
    /// Page index (0-based).
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
}

/// A fully assembled, structured document.
///
/// Immutable after assembly: every structural change requires re-running the
/// pipeline. All spans anywhere in the document index into `raw_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    /// Flat concatenated text of the whole document.
    pub raw_text: String,
    pub pages: Vec<PageDims>,
    /// Section tree in document order.
    pub sections: Vec<Section>,
    /// Links in anchor-offset order.
    pub links: Vec<Link>,
    /// Layout elements from the external detector, in detection order.
    pub layout: Vec<LayoutElement>,
    pub heading_source: HeadingSource,
    pub notes: Vec<QualityNote>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of sections including nested ones.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::subtree_len).sum()
    }

    /// Depth-first iteration over all sections in document order.
    pub fn walk_sections(&self) -> impl Iterator<Item = &Section> {
        walk_sections(&self.sections)
    }

    /// Section at the given depth-first document-order index.
    pub fn section_at(&self, index: usize) -> Option<&Section> {
        self.walk_sections().nth(index)
    }

    /// Check that `span` is in bounds for this document's text.
    pub fn check_span(&self, span: &Span) -> Result<()> {
        if span.start > span.end || span.end > self.raw_text.len() {
            return Err(Error::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len: self.raw_text.len(),
            });
        }
        Ok(())
    }

    /// Serialize to JSON in the requested format.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };
        result.map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Persist to `path` as pretty JSON.
    ///
    /// The write goes through a sibling temp file followed by a rename, so a
    /// concurrent reader never observes a partially written document.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json(JsonFormat::Pretty)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a previously persisted document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
        let data = fs::read_to_string(path)?;
        let doc: Document = serde_json::from_str(&data)?;
        Ok(doc)
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation.
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace.
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_doc() -> Document {
        Document {
            metadata: Metadata {
                title: "Test".to_string(),
                ..Default::default()
            },
            raw_text: "Introduction\nBody text.".to_string(),
            pages: vec![PageDims {
                page_number: 0,
                width: 612.0,
                height: 792.0,
            }],
            sections: vec![Section::new(
                "Introduction",
                1,
                Span::new(0, 12),
                Span::new(13, 23),
            )],
            links: Vec::new(),
            layout: Vec::new(),
            heading_source: HeadingSource::FontHeuristic,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_check_span() {
        let doc = minimal_doc();
        assert!(doc.check_span(&Span::new(0, 23)).is_ok());
        assert!(doc.check_span(&Span::new(0, 24)).is_err());
    }

    #[test]
    fn test_to_json_formats() {
        let doc = minimal_doc();
        let pretty = doc.to_json(JsonFormat::Pretty).unwrap();
        let compact = doc.to_json(JsonFormat::Compact).unwrap();
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\"heading_source\": \"font_heuristic\""));
    }

    #[test]
    fn test_section_at_depth_first_index() {
        let mut doc = minimal_doc();
        doc.sections[0]
            .children
            .push(Section::new("Sub", 2, Span::new(13, 16), Span::new(17, 23)));
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.section_at(1).unwrap().heading, "Sub");
        assert!(doc.section_at(2).is_none());
    }
}
