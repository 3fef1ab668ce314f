//! Heading resolution: pick one detection strategy and normalize its output.
//!
//! The outline strategy and the font heuristic are alternatives, never
//! blended. The outline wins whenever it resolves at least one entry; the
//! font heuristic is the fallback; and a document where both come up empty
//! is still valid (it becomes a single implicit section downstream).

use log::debug;

use super::filters::{section_number_regex, HeadingFilters};
use super::fonts::detect_font_headings;
use super::options::ParseOptions;
use super::outline::{resolve_outline, OutlineResolution};
use super::textmap::TextMap;
use crate::input::PdfContent;
use crate::model::{HeadingSource, NoteStage, QualityNote, Span};

/// A detected heading, strategy-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    /// Nesting level, 1-based.
    pub level: u32,
    /// Page index (0-based).
    pub page: usize,
    /// Offsets of the heading text within the document text.
    pub span: Span,
    /// Font size of the matched line, when one was matched.
    pub font_size: Option<f32>,
}

/// Headings in document order plus which strategy produced them.
#[derive(Debug)]
pub struct ResolvedHeadings {
    pub headings: Vec<Heading>,
    pub source: HeadingSource,
}

/// Words that end a wrapped heading line mid-phrase ("Detection and" /
/// "Tracking").
const TRAILING_CONJUNCTIONS: [&str; 12] = [
    "and", "or", "of", "for", "in", "the", "with", "to", "a", "an", "on", "by",
];

pub fn resolve_headings(
    map: &TextMap,
    content: &PdfContent,
    options: &ParseOptions,
    filters: &HeadingFilters,
    notes: &mut Vec<QualityNote>,
) -> ResolvedHeadings {
    let (mut headings, source) =
        match resolve_outline(map, &content.outline, options, notes) {
            OutlineResolution::Resolved(h) => {
                debug!("outline strategy resolved {} headings", h.len());
                (h, HeadingSource::Outline)
            }
            OutlineResolution::Unavailable => {
                let h = detect_font_headings(map, options, filters, notes);
                if h.is_empty() {
                    debug!("no headings from either strategy");
                    (h, HeadingSource::None)
                } else {
                    debug!("font heuristic detected {} headings", h.len());
                    (h, HeadingSource::FontHeuristic)
                }
            }
        };

    headings.sort_by_key(|h| h.span.start);
    let headings = merge_fragments(drop_duplicate_offsets(headings, notes));

    ResolvedHeadings { headings, source }
}

/// Two headings can land on one offset when unmatched outline entries fall
/// back to the same page start. Keeping both would produce empty phantom
/// sections, so the later one is dropped, with a note.
fn drop_duplicate_offsets(
    headings: Vec<Heading>,
    notes: &mut Vec<QualityNote>,
) -> Vec<Heading> {
    let mut kept: Vec<Heading> = Vec::with_capacity(headings.len());
    for heading in headings {
        if let Some(prev) = kept.last() {
            if prev.span.start == heading.span.start {
                notes.push(QualityNote::new(
                    NoteStage::HeadingDetection,
                    format!(
                        "heading {:?} resolved to the same offset as {:?}; dropped",
                        heading.text, prev.text
                    ),
                    Some(heading.page),
                ));
                continue;
            }
        }
        kept.push(heading);
    }
    kept
}

/// Re-join headings that are fragments of one visual heading: a bare section
/// number followed by its text ("1" / "Introduction"), or a line wrapped
/// after a conjunction ("Detection and" / "Tracking"). Fragments must be
/// adjacent lines on the same page at roughly the same font size. A merge
/// started by a bare number keeps absorbing single non-number words, so
/// "3" / "Non-Violent Communication" / "Framework" becomes one heading.
fn merge_fragments(headings: Vec<Heading>) -> Vec<Heading> {
    let section_num = section_number_regex();
    let mut merged: Vec<Heading> = Vec::with_capacity(headings.len());
    // Set while the last pushed heading grew out of a bare section number.
    let mut number_run = false;

    for heading in headings {
        if let Some(prev) = merged.last_mut() {
            let adjacent = prev.page == heading.page
                && heading.span.start >= prev.span.end
                && heading.span.start - prev.span.end <= 1;
            if adjacent
                && fonts_close(prev.font_size, heading.font_size)
                && should_join(&prev.text, &heading.text, number_run, &section_num)
            {
                number_run = number_run || section_num.is_match(prev.text.trim());
                prev.text = format!("{} {}", prev.text, heading.text);
                prev.level = prev.level.min(heading.level);
                prev.span = Span::new(prev.span.start, heading.span.end);
                prev.font_size = heading.font_size;
                continue;
            }
        }
        number_run = false;
        merged.push(heading);
    }

    merged
}

fn fonts_close(a: Option<f32>, b: Option<f32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() < 1.0,
        _ => false,
    }
}

fn should_join(
    prev: &str,
    next: &str,
    number_run: bool,
    section_num: &regex::Regex,
) -> bool {
    let prev = prev.trim();
    if section_num.is_match(prev) {
        return true;
    }
    let ends_incomplete = prev
        .rsplit(' ')
        .next()
        .is_some_and(|last| TRAILING_CONJUNCTIONS.contains(&last.to_lowercase().as_str()));
    if ends_incomplete {
        return true;
    }
    number_run
        && next.split_whitespace().count() == 1
        && !section_num.is_match(next.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{OutlineEntry, PageContent, TextLine};
    use crate::model::Rect;

    fn heading(text: &str, level: u32, page: usize, start: usize) -> Heading {
        sized_heading(text, level, page, start, 14.0)
    }

    fn sized_heading(
        text: &str,
        level: u32,
        page: usize,
        start: usize,
        font_size: f32,
    ) -> Heading {
        Heading {
            text: text.to_string(),
            level,
            page,
            span: Span::new(start, start + text.len()),
            font_size: Some(font_size),
        }
    }

    #[test]
    fn test_bare_number_merges_with_following_text() {
        let merged = merge_fragments(vec![
            heading("1", 1, 0, 100),
            heading("Introduction", 1, 0, 102),
            heading("2 Methods", 1, 1, 400),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "1 Introduction");
        assert_eq!(merged[0].span, Span::new(100, 114));
        assert_eq!(merged[1].text, "2 Methods");
    }

    #[test]
    fn test_trailing_conjunction_merges() {
        let merged = merge_fragments(vec![
            heading("3 Detection and", 1, 2, 900),
            heading("Tracking", 1, 2, 916),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "3 Detection and Tracking");
    }

    #[test]
    fn test_single_word_continuation_after_number_merge() {
        let merged = merge_fragments(vec![
            heading("3", 1, 1, 100),
            heading("Non-Violent Communication", 1, 1, 102),
            heading("Framework", 1, 1, 128),
            heading("4 Evaluation", 1, 1, 400),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "3 Non-Violent Communication Framework");
        assert_eq!(merged[0].span, Span::new(100, 137));
        assert_eq!(merged[1].text, "4 Evaluation");
    }

    #[test]
    fn test_no_merge_across_font_sizes() {
        // A title-sized stray digit must not swallow a body-level heading
        let merged = merge_fragments(vec![
            sized_heading("1", 1, 0, 100, 12.0),
            sized_heading("Introduction", 1, 0, 102, 12.0),
        ]);
        assert_eq!(merged.len(), 1);

        let merged = merge_fragments(vec![
            sized_heading("1", 1, 0, 100, 20.0),
            sized_heading("Introduction", 1, 0, 102, 12.0),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "1");
    }

    #[test]
    fn test_no_merge_across_pages_or_gaps() {
        let merged = merge_fragments(vec![
            heading("4", 1, 2, 900),
            heading("Results", 1, 3, 902),
            heading("5 Discussion", 1, 3, 1200),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_fallback_to_font_heuristic() {
        // One-entry outline is below the minimum, so the font heuristic runs
        let pages = vec![PageContent::with_lines(
            612.0,
            792.0,
            vec![
                TextLine::new("A Study of Parsing", 20.0, true, Rect::new(72.0, 80.0, 540.0, 100.0)),
                TextLine::new("Body text anchoring the mode at eleven points here.", 11.0, false, Rect::new(72.0, 100.0, 540.0, 111.0)),
                TextLine::new("Another body line of comparable length for the mode.", 11.0, false, Rect::new(72.0, 120.0, 540.0, 131.0)),
                TextLine::new("1 Introduction", 14.0, true, Rect::new(72.0, 140.0, 200.0, 154.0)),
            ],
        )];
        let content = PdfContent::new(pages)
            .with_outline(vec![OutlineEntry::new("Introduction", 1, 0)]);
        let map = TextMap::build(&content).unwrap();
        let mut notes = Vec::new();
        let resolved = resolve_headings(
            &map,
            &content,
            &ParseOptions::default(),
            &HeadingFilters::new(0.05),
            &mut notes,
        );
        assert_eq!(resolved.source, HeadingSource::FontHeuristic);
        assert_eq!(resolved.headings.len(), 1);
        assert_eq!(resolved.headings[0].text, "1 Introduction");
    }

    #[test]
    fn test_colliding_page_start_fallbacks_drop_with_note() {
        // Two unmatched entries on the same page both fall back to the page
        // start; the second is dropped and the drop is recorded
        let pages = vec![
            PageContent::with_lines(
                612.0,
                792.0,
                vec![TextLine::new("Unrelated front matter text.", 11.0, false, Rect::new(72.0, 100.0, 540.0, 111.0))],
            ),
            PageContent::with_lines(
                612.0,
                792.0,
                vec![TextLine::new("3. Results", 11.0, false, Rect::new(72.0, 100.0, 540.0, 111.0))],
            ),
        ];
        let content = PdfContent::new(pages).with_outline(vec![
            OutlineEntry::new("Alpha", 1, 0),
            OutlineEntry::new("Beta", 1, 0),
            OutlineEntry::new("Results", 1, 1),
        ]);
        let map = TextMap::build(&content).unwrap();
        let mut notes = Vec::new();
        let resolved = resolve_headings(
            &map,
            &content,
            &ParseOptions::default(),
            &HeadingFilters::new(0.05),
            &mut notes,
        );
        assert_eq!(resolved.headings.len(), 2);
        assert_eq!(resolved.headings[0].text, "Alpha");
        assert_eq!(resolved.headings[1].text, "Results");
        assert!(notes
            .iter()
            .any(|n| n.stage == NoteStage::HeadingDetection && n.detail.contains("Beta")));
    }

    #[test]
    fn test_outline_wins_when_usable() {
        let pages = vec![PageContent::with_lines(
            612.0,
            792.0,
            vec![
                TextLine::new("1. Introduction", 11.0, false, Rect::new(72.0, 100.0, 540.0, 111.0)),
                TextLine::new("2. Methods", 11.0, false, Rect::new(72.0, 300.0, 540.0, 311.0)),
                TextLine::new("3. Results", 11.0, false, Rect::new(72.0, 500.0, 540.0, 511.0)),
            ],
        )];
        let content = PdfContent::new(pages).with_outline(vec![
            OutlineEntry::new("Introduction", 1, 0),
            OutlineEntry::new("Methods", 1, 0),
            OutlineEntry::new("Results", 1, 0),
        ]);
        let map = TextMap::build(&content).unwrap();
        let mut notes = Vec::new();
        let resolved = resolve_headings(
            &map,
            &content,
            &ParseOptions::default(),
            &HeadingFilters::new(0.05),
            &mut notes,
        );
        assert_eq!(resolved.source, HeadingSource::Outline);
        assert_eq!(resolved.headings.len(), 3);
    }
}
