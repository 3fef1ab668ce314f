//! Visually detected layout elements (figures, tables, equations).
//!
//! Detection itself is an external capability: an ML-based detector renders
//! pages and reports candidate boxes. This crate only orders the results,
//! assigns display labels, and folds them into the ref registry.

use serde::{Deserialize, Serialize};

use super::PageBox;
use crate::error::Result;

/// Kind of a detected layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Figure,
    Table,
    Equation,
}

impl LayoutKind {
    /// Display-label prefix ("Figure 1", "Table 2", "Eq. 3").
    pub fn label_prefix(&self) -> &'static str {
        match self {
            LayoutKind::Figure => "Figure",
            LayoutKind::Table => "Table",
            LayoutKind::Equation => "Eq.",
        }
    }

    /// Ref-id prefix used by the registry ("f1", "t1", "eq1").
    pub fn ref_prefix(&self) -> &'static str {
        match self {
            LayoutKind::Figure => "f",
            LayoutKind::Table => "t",
            LayoutKind::Equation => "eq",
        }
    }
}

/// A detected figure, table, or equation region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutElement {
    pub kind: LayoutKind,
    #[serde(rename = "box")]
    pub bbox: PageBox,
    /// Detector confidence in 0–1.
    pub confidence: f32,
    /// Caption text located near the box, if any.
    pub caption: Option<String>,
    /// Sequential display label ("Figure 1"), assigned after ordering.
    pub label: Option<String>,
    /// Reference to an extracted image artifact, if the detector produced
    /// one.
    pub image_ref: Option<String>,
}

impl LayoutElement {
    pub fn new(kind: LayoutKind, bbox: PageBox, confidence: f32) -> Self {
        Self {
            kind,
            bbox,
            confidence,
            caption: None,
            label: None,
            image_ref: None,
        }
    }
}

/// Capability object for visual layout detection.
///
/// Constructed once by the caller and passed to whoever needs detection;
/// callers that never detect layout pay no initialization cost. The detector
/// runs lazily, out-of-band from the text parse.
pub trait LayoutDetector {
    /// Detect layout elements on every page, in page order.
    fn detect(&self) -> Result<Vec<LayoutElement>>;
}

/// Sort elements into detection order (page, then top edge) and assign
/// per-kind sequential labels.
pub fn order_and_label(mut elements: Vec<LayoutElement>) -> Vec<LayoutElement> {
    elements.sort_by(|a, b| {
        a.bbox
            .page
            .cmp(&b.bbox.page)
            .then(a.bbox.rect.y0.partial_cmp(&b.bbox.rect.y0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut counters = [0usize; 3];
    for elem in &mut elements {
        let idx = elem.kind as usize;
        counters[idx] += 1;
        elem.label = Some(format!("{} {}", elem.kind.label_prefix(), counters[idx]));
    }
    elements
}
