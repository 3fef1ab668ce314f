//! Section tree and sentence types.

use serde::{Deserialize, Serialize};

use super::Span;

/// A single sentence within a section.
///
/// Text is not stored; it is always sliced from the document's `raw_text`
/// so that every representation shares one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub span: Span,
    /// Page the sentence starts on (0-based).
    pub page: usize,
}

impl Sentence {
    pub fn new(span: Span, page: usize) -> Self {
        Self { span, page }
    }
}

/// A document section: heading, own content span, sentences, and child
/// sections.
///
/// `span` covers the section's *own* content only; it ends where the first
/// subsection begins. The full subtree range is available via
/// [`Section::subtree_span`]. Sections appear in document order; a parent's
/// subtree span contains every descendant's, and sibling subtree spans never
/// overlap. A section with zero sentences is a legitimate structural
/// grouping, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    /// Hierarchy level, 1-based.
    pub level: u32,
    /// Span of the heading line itself.
    pub heading_span: Span,
    /// Span of the section's own content, excluding the heading line and
    /// all descendant sections.
    pub span: Span,
    pub sentences: Vec<Sentence>,
    pub children: Vec<Section>,
    /// First page of the section (0-based).
    pub page_start: usize,
    /// Last page covered by the section's own content.
    pub page_end: usize,
}

impl Section {
    pub fn new(heading: impl Into<String>, level: u32, heading_span: Span, span: Span) -> Self {
        Self {
            heading: heading.into(),
            level,
            heading_span,
            span,
            sentences: Vec::new(),
            children: Vec::new(),
            page_start: 0,
            page_end: 0,
        }
    }

    /// The section's own content text.
    pub fn content<'a>(&self, raw_text: &'a str) -> &'a str {
        self.span.slice(raw_text)
    }

    /// Full range of the section: heading start through the end of the last
    /// descendant (or of the own content when there are no children).
    pub fn subtree_span(&self) -> Span {
        let end = self
            .children
            .last()
            .map(|c| c.subtree_span().end)
            .unwrap_or(self.span.end);
        Span::new(self.heading_span.start, end)
    }

    /// Total number of sections in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Section::subtree_len).sum::<usize>()
    }

    /// Depth-first walk over this subtree in document order.
    pub fn walk(&self) -> impl Iterator<Item = &Section> {
        // Explicit stack; children are pushed in reverse so the leftmost
        // child is visited first.
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            for child in next.children.iter().rev() {
                stack.push(child);
            }
            Some(next)
        })
    }
}

/// Depth-first iteration over a forest of sections in document order.
pub fn walk_sections(sections: &[Section]) -> impl Iterator<Item = &Section> {
    sections.iter().flat_map(Section::walk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(heading: &str, level: u32, start: usize, end: usize) -> Section {
        Section::new(heading, level, Span::new(start, start), Span::new(start, end))
    }

    #[test]
    fn test_subtree_span_extends_over_children() {
        let mut root = section("1 Methods", 1, 0, 50);
        root.children.push(section("1.1 Data", 2, 50, 120));
        root.children.push(section("1.2 Training", 2, 120, 200));

        let full = root.subtree_span();
        assert_eq!(full.start, 0);
        assert_eq!(full.end, 200);
        assert_eq!(root.span.end, 50); // own content stops at first child
    }

    #[test]
    fn test_walk_document_order() {
        let mut root = section("1 Methods", 1, 0, 10);
        let mut sub = section("1.1 Data", 2, 10, 20);
        sub.children.push(section("1.1.1 Sources", 3, 20, 30));
        root.children.push(sub);
        root.children.push(section("1.2 Training", 2, 30, 40));

        let headings: Vec<&str> = root.walk().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec!["1 Methods", "1.1 Data", "1.1.1 Sources", "1.2 Training"]
        );
        assert_eq!(root.subtree_len(), 4);
    }

    #[test]
    fn test_zero_sentences_is_valid() {
        let s = section("2 Results", 1, 0, 0);
        assert!(s.sentences.is_empty());
        assert!(s.span.is_empty());
    }
}
