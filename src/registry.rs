//! Stable reference ids over a parsed document.
//!
//! Ids are assigned by a fixed traversal, so byte-identical documents always
//! yield identical ids: sections depth-first ("s1", "s2", ...), then links in
//! anchor-offset order split by kind ("e1" external, "i1" internal, "c1"
//! citation), then layout elements in detection order ("f1" figure, "t1"
//! table, "eq1" equation). Each sequence is 1-based within its kind.

use crate::model::{Document, LayoutKind, LinkKind};
use crate::{Error, Result};

/// What a reference id points at, as an index into the owning document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    /// Depth-first section index.
    Section(usize),
    /// Index into `Document::links`.
    Link(usize),
    /// Index into `Document::layout`.
    Layout(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub id: String,
    pub target: RefTarget,
}

/// Immutable id table built once per document.
#[derive(Debug, Default)]
pub struct RefRegistry {
    entries: Vec<RefEntry>,
}

impl RefRegistry {
    pub fn build(doc: &Document) -> Self {
        let mut entries = Vec::new();

        for (index, _) in doc.walk_sections().enumerate() {
            entries.push(RefEntry {
                id: format!("s{}", index + 1),
                target: RefTarget::Section(index),
            });
        }

        let mut external = 0usize;
        let mut internal = 0usize;
        let mut citation = 0usize;
        for (index, link) in doc.links.iter().enumerate() {
            let (prefix, seq) = match link.kind() {
                LinkKind::External => ("e", &mut external),
                LinkKind::Internal => ("i", &mut internal),
                LinkKind::Citation => ("c", &mut citation),
            };
            *seq += 1;
            entries.push(RefEntry {
                id: format!("{prefix}{seq}"),
                target: RefTarget::Link(index),
            });
        }

        let mut figures = 0usize;
        let mut tables = 0usize;
        let mut equations = 0usize;
        for (index, element) in doc.layout.iter().enumerate() {
            let seq = match element.kind {
                LayoutKind::Figure => &mut figures,
                LayoutKind::Table => &mut tables,
                LayoutKind::Equation => &mut equations,
            };
            *seq += 1;
            entries.push(RefEntry {
                id: format!("{}{seq}", element.kind.ref_prefix()),
                target: RefTarget::Layout(index),
            });
        }

        Self { entries }
    }

    /// Target for an id, or `None` when unknown.
    pub fn lookup(&self, id: &str) -> Option<RefTarget> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.target)
    }

    /// Like [`lookup`](Self::lookup) but failing with `Error::UnknownRef`.
    pub fn resolve(&self, id: &str) -> Result<RefTarget> {
        self.lookup(id)
            .ok_or_else(|| Error::UnknownRef(id.to_string()))
    }

    pub fn entries(&self) -> &[RefEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Section ids in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, usize)> {
        self.of(|t| match t {
            RefTarget::Section(i) => Some(i),
            _ => None,
        })
    }

    /// Link ids in document order.
    pub fn links(&self) -> impl Iterator<Item = (&str, usize)> {
        self.of(|t| match t {
            RefTarget::Link(i) => Some(i),
            _ => None,
        })
    }

    /// Layout element ids in document order.
    pub fn layout(&self) -> impl Iterator<Item = (&str, usize)> {
        self.of(|t| match t {
            RefTarget::Layout(i) => Some(i),
            _ => None,
        })
    }

    fn of<F>(&self, pick: F) -> impl Iterator<Item = (&str, usize)>
    where
        F: Fn(RefTarget) -> Option<usize>,
    {
        self.entries
            .iter()
            .filter_map(move |entry| pick(entry.target).map(|i| (entry.id.as_str(), i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        HeadingSource, LayoutElement, Link, LinkTarget, Metadata, PageBox, PageDims, Rect,
        Section, Span,
    };

    fn doc_with(links: Vec<Link>, layout: Vec<LayoutElement>) -> Document {
        let mut root = Section::new("1 Intro", 1, Span::new(0, 7), Span::new(8, 40));
        root.children
            .push(Section::new("1.1 Sub", 2, Span::new(40, 47), Span::new(48, 80)));
        Document {
            metadata: Metadata::default(),
            raw_text: "x".repeat(80),
            pages: vec![PageDims { page_number: 0, width: 612.0, height: 792.0 }],
            sections: vec![root],
            links,
            layout,
            heading_source: HeadingSource::Outline,
            notes: Vec::new(),
        }
    }

    fn citation(span: Span) -> Link {
        Link::new(
            LinkTarget::Citation { indices: vec![1], dest: None },
            "[1]",
            0,
            span,
        )
    }

    #[test]
    fn test_ids_by_kind_and_order() {
        let links = vec![
            Link::new(
                LinkTarget::External { url: "https://a.example".into() },
                "a",
                0,
                Span::new(10, 11),
            ),
            citation(Span::new(12, 15)),
            Link::new(
                LinkTarget::Internal { dest: "section.2".into(), target_page: Some(1) },
                "b",
                0,
                Span::new(20, 21),
            ),
            citation(Span::new(30, 33)),
        ];
        let layout = vec![
            LayoutElement::new(LayoutKind::Figure, PageBox::new(0, Rect::new(0.0, 0.0, 10.0, 10.0), 612.0, 792.0), 0.9),
            LayoutElement::new(LayoutKind::Table, PageBox::new(0, Rect::new(0.0, 20.0, 10.0, 30.0), 612.0, 792.0), 0.8),
            LayoutElement::new(LayoutKind::Figure, PageBox::new(0, Rect::new(0.0, 40.0, 10.0, 50.0), 612.0, 792.0), 0.7),
        ];
        let doc = doc_with(links, layout);
        let registry = RefRegistry::build(&doc);

        assert_eq!(registry.lookup("s1"), Some(RefTarget::Section(0)));
        assert_eq!(registry.lookup("s2"), Some(RefTarget::Section(1)));
        assert_eq!(registry.lookup("e1"), Some(RefTarget::Link(0)));
        assert_eq!(registry.lookup("c1"), Some(RefTarget::Link(1)));
        assert_eq!(registry.lookup("i1"), Some(RefTarget::Link(2)));
        assert_eq!(registry.lookup("c2"), Some(RefTarget::Link(3)));
        assert_eq!(registry.lookup("f1"), Some(RefTarget::Layout(0)));
        assert_eq!(registry.lookup("t1"), Some(RefTarget::Layout(1)));
        assert_eq!(registry.lookup("f2"), Some(RefTarget::Layout(2)));
    }

    #[test]
    fn test_unknown_id() {
        let doc = doc_with(Vec::new(), Vec::new());
        let registry = RefRegistry::build(&doc);
        assert_eq!(registry.lookup("z9"), None);
        assert!(matches!(registry.resolve("c1"), Err(Error::UnknownRef(_))));
    }

    #[test]
    fn test_identical_documents_identical_ids() {
        let a = RefRegistry::build(&doc_with(vec![citation(Span::new(10, 13))], Vec::new()));
        let b = RefRegistry::build(&doc_with(vec![citation(Span::new(10, 13))], Vec::new()));
        let ids_a: Vec<&str> = a.entries().iter().map(|e| e.id.as_str()).collect();
        let ids_b: Vec<&str> = b.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_typed_iteration() {
        let doc = doc_with(vec![citation(Span::new(10, 13))], Vec::new());
        let registry = RefRegistry::build(&doc);
        let sections: Vec<(&str, usize)> = registry.sections().collect();
        assert_eq!(sections, vec![("s1", 0), ("s2", 1)]);
        let links: Vec<(&str, usize)> = registry.links().collect();
        assert_eq!(links, vec![("c1", 0)]);
        assert_eq!(registry.layout().count(), 0);
    }
}
