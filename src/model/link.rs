//! Link types: external URLs, in-document jumps, and citations.

use serde::{Deserialize, Serialize};

use super::Span;

/// Link classification, mirroring [`LinkTarget`] for cheap filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    External,
    Internal,
    Citation,
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkTarget {
    /// External URL.
    External { url: String },
    /// In-document destination: a named destination and/or target page.
    Internal {
        dest: String,
        /// Target page index (0-based); `None` when only a name is known.
        target_page: Option<usize>,
    },
    /// Bibliography reference. `indices` holds every expanded numeric
    /// reference index ("[1-3]" yields `[1, 2, 3]`); empty for author-year
    /// citations resolved through a named destination.
    Citation {
        indices: Vec<u32>,
        /// Named destination backing the citation, when hyperlinked.
        dest: Option<String>,
    },
}

impl LinkTarget {
    pub fn kind(&self) -> LinkKind {
        match self {
            LinkTarget::External { .. } => LinkKind::External,
            LinkTarget::Internal { .. } => LinkKind::Internal,
            LinkTarget::Citation { .. } => LinkKind::Citation,
        }
    }
}

/// Where a link's anchor text lives in the section tree.
///
/// `section` is the depth-first document-order index of the owning section
/// (the same order the ref registry numbers sections). `sentence` indexes
/// into that section's sentence list when a single sentence fully contains
/// the anchor; links spanning sentence boundaries anchor to the section
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAnchor {
    pub section: usize,
    pub sentence: Option<usize>,
}

/// A link extracted from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub target: LinkTarget,
    /// Anchor text (or citation marker, e.g. "[1]").
    pub text: String,
    /// Page the link appears on (0-based).
    pub page: usize,
    /// Character span of the anchor text in `raw_text`.
    pub span: Span,
    /// Resolved anchor in the section tree, when one exists.
    pub anchor: Option<LinkAnchor>,
}

impl Link {
    pub fn new(target: LinkTarget, text: impl Into<String>, page: usize, span: Span) -> Self {
        Self {
            target,
            text: text.into(),
            page,
            span,
            anchor: None,
        }
    }

    pub fn kind(&self) -> LinkKind {
        self.target.kind()
    }

    /// URL for external links, `None` otherwise.
    pub fn url(&self) -> Option<&str> {
        match &self.target {
            LinkTarget::External { url } => Some(url),
            _ => None,
        }
    }

    /// Expanded reference indices for citation links.
    pub fn citation_indices(&self) -> &[u32] {
        match &self.target {
            LinkTarget::Citation { indices, .. } => indices,
            _ => &[],
        }
    }
}
