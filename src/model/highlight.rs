//! Highlights: user annotations over page geometry.
//!
//! Highlights live outside the parse pipeline: they are created by locating
//! text through the coordinate mapper, persisted by an external layer, and
//! mutated only through note/color edits. Their rectangles carry parse-time
//! page dimensions so a viewer can re-scale them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PageBox;

/// Highlight colors supported by viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Pink,
}

impl HighlightColor {
    /// RGB stroke color in 0–1 components.
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            HighlightColor::Yellow => (1.0, 0.92, 0.23),
            HighlightColor::Green => (0.56, 0.93, 0.56),
            HighlightColor::Blue => (0.68, 0.85, 0.9),
            HighlightColor::Pink => (1.0, 0.71, 0.76),
        }
    }
}

/// A stored highlight: one or more rectangles (a selection can wrap across
/// lines), a color, and an optional note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Stable integer id, unique within the owning set.
    pub id: u64,
    /// Page the highlight starts on (0-based).
    pub page: usize,
    pub rects: Vec<PageBox>,
    /// The highlighted text at creation time.
    pub text: String,
    pub color: HighlightColor,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// The set of highlights for one document.
///
/// Ids are assigned as max-existing + 1, so they stay stable across removals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightSet {
    pub highlights: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a highlight, assigning the next id. Returns the assigned id.
    pub fn add(
        &mut self,
        page: usize,
        rects: Vec<PageBox>,
        text: impl Into<String>,
        color: HighlightColor,
        note: impl Into<String>,
    ) -> u64 {
        let id = self.highlights.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        self.highlights.push(Highlight {
            id,
            page,
            rects,
            text: text.into(),
            color,
            note: note.into(),
            created_at: Utc::now(),
        });
        id
    }

    /// Remove a highlight by id. Returns `true` when one was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.highlights.len();
        self.highlights.retain(|h| h.id != id);
        self.highlights.len() != before
    }

    /// Edit the note of an existing highlight. Returns `false` for unknown
    /// ids.
    pub fn set_note(&mut self, id: u64, note: impl Into<String>) -> bool {
        match self.highlights.iter_mut().find(|h| h.id == id) {
            Some(h) => {
                h.note = note.into();
                true
            }
            None => false,
        }
    }

    /// Edit the color of an existing highlight. Returns `false` for unknown
    /// ids.
    pub fn set_color(&mut self, id: u64, color: HighlightColor) -> bool {
        match self.highlights.iter_mut().find(|h| h.id == id) {
            Some(h) => {
                h.color = color;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.id == id)
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}
