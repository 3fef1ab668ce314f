//! Offset and page-geometry primitives.
//!
//! Every derived entity in a parsed document (section, sentence, link,
//! highlight) is addressed two ways: as a [`Span`] into the flat `raw_text`
//! buffer, and as one or more [`PageBox`] rectangles in page coordinates.

use serde::{Deserialize, Serialize};

/// A half-open byte-offset range into a document's `raw_text`.
///
/// Invariant: `start <= end <= raw_text.len()`, and both offsets lie on
/// UTF-8 char boundaries. Spans are only ever produced by slicing existing
/// line spans, which preserves both properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies fully inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether a single offset lies inside this span.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether the two spans share at least one offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slice `text` at this span.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// An axis-aligned rectangle in page points, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether the two rectangles overlap (touching edges count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A bounding rectangle on a specific page, carrying the page dimensions
/// observed at parse time so consumers can re-derive scale-independent
/// coordinates later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    /// Page index (0-based).
    pub page: usize,
    pub rect: Rect,
    pub page_width: f32,
    pub page_height: f32,
}

impl PageBox {
    pub fn new(page: usize, rect: Rect, page_width: f32, page_height: f32) -> Self {
        Self {
            page,
            rect,
            page_width,
            page_height,
        }
    }

    /// Coordinates normalized to the 0–1 range as fractions of the page
    /// dimensions, rounded to four decimals.
    pub fn scaled(&self) -> ScaledBox {
        let round4 = |v: f32| (v * 10_000.0).round() / 10_000.0;
        let x1 = self.rect.x0 / self.page_width;
        let y1 = self.rect.y0 / self.page_height;
        let x2 = self.rect.x1 / self.page_width;
        let y2 = self.rect.y1 / self.page_height;
        ScaledBox {
            x1: round4(x1),
            y1: round4(y1),
            x2: round4(x2),
            y2: round4(y2),
            width: round4(x2 - x1),
            height: round4(y2 - y1),
            page_number: self.page + 1,
        }
    }
}

/// A [`PageBox`] in normalized page-fraction coordinates (1-indexed page
/// number, matching viewer-facing highlight formats).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub height: f32,
    pub page_number: usize,
}
