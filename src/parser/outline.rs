//! Outline strategy: resolve the embedded table of contents to character
//! offsets.
//!
//! Outline entries carry only a target page, so each title has to be located
//! among that page's text lines. Matching is whitespace-normalized substring
//! containment in either direction rather than exact equality, since numbering
//! prefixes routinely differ between the outline and the page ("Introduction"
//! vs "1. Introduction"). This is a recall-over-precision trade-off: an entry
//! that matches nothing still resolves, degraded, to the start of its target
//! page.

use log::debug;

use super::headings::Heading;
use super::options::ParseOptions;
use super::textmap::TextMap;
use crate::input::OutlineEntry;
use crate::model::{NoteStage, QualityNote, Span};

/// Outcome of the outline strategy.
#[derive(Debug)]
pub enum OutlineResolution {
    /// Every usable entry mapped to an offset (possibly via the page-start
    /// fallback).
    Resolved(Vec<Heading>),
    /// The document has no usable outline; the caller falls back to font
    /// heuristics.
    Unavailable,
}

/// Resolve outline entries against the text map.
pub fn resolve_outline(
    map: &TextMap,
    outline: &[OutlineEntry],
    options: &ParseOptions,
    notes: &mut Vec<QualityNote>,
) -> OutlineResolution {
    if outline.len() < options.min_outline_entries {
        debug!(
            "outline unavailable: {} entries (minimum {})",
            outline.len(),
            options.min_outline_entries
        );
        return OutlineResolution::Unavailable;
    }

    let mut headings = Vec::with_capacity(outline.len());

    for entry in outline {
        let title = entry.title.trim();
        if title.is_empty() {
            continue;
        }
        let title_lower = title.to_lowercase();

        match find_title_line(map, entry.page, options.outline_page_tolerance, &title_lower) {
            Some((line_idx, title_offset)) => {
                let line = &map.lines[line_idx];
                let start = line.span.start + title_offset;
                headings.push(Heading {
                    text: title.to_string(),
                    level: entry.level.max(1),
                    page: line.page,
                    span: Span::new(start, line.span.end),
                    font_size: Some(line.font_size),
                });
            }
            None => {
                // Degraded, not fatal: anchor to the start of the target page
                match map.page_start_offset(entry.page) {
                    Some(start) => {
                        debug!("outline entry {:?} unmatched on page {}", title, entry.page);
                        notes.push(QualityNote::new(
                            NoteStage::Outline,
                            format!("outline entry {title:?} matched no line; using page start"),
                            Some(entry.page),
                        ));
                        headings.push(Heading {
                            text: title.to_string(),
                            level: entry.level.max(1),
                            page: entry.page,
                            span: Span::new(start, start),
                            font_size: None,
                        });
                    }
                    None => {
                        notes.push(QualityNote::new(
                            NoteStage::Outline,
                            format!("outline entry {title:?} targets page {} with no text", entry.page),
                            Some(entry.page),
                        ));
                    }
                }
            }
        }
    }

    if headings.is_empty() {
        OutlineResolution::Unavailable
    } else {
        OutlineResolution::Resolved(headings)
    }
}

/// Find the line best matching a title on `page` or up to `tolerance`
/// following pages. Returns the line index and the byte offset of the title
/// within the line (0 when the title contains the line instead).
fn find_title_line(
    map: &TextMap,
    page: usize,
    tolerance: usize,
    title_lower: &str,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut best_score = 0.0f32;

    for (idx, line) in map.lines.iter().enumerate() {
        if line.page < page || line.page > page + tolerance {
            continue;
        }
        let line_text = map.line_text(line);
        let line_lower = line_text.to_lowercase();

        if line_lower == title_lower {
            return Some((idx, 0));
        }

        if let Some(pos) = line_lower.find(title_lower) {
            let score = title_lower.len() as f32 / line_lower.len().max(1) as f32;
            if score > best_score {
                best_score = score;
                // Byte offsets from the lowercased text are only valid when
                // folding preserved lengths; otherwise anchor at line start.
                let offset = if line_lower.len() == line_text.len() { pos } else { 0 };
                best = Some((idx, offset));
            }
        } else if title_lower.contains(&line_lower) {
            let score = line_lower.len() as f32 / title_lower.len().max(1) as f32;
            if score > best_score {
                best_score = score;
                best = Some((idx, 0));
            }
        }
    }

    best
}
