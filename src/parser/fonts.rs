//! Font-heuristic strategy: infer headings from type size and weight when no
//! usable outline exists.
//!
//! The body font size is the character-weighted mode of all line sizes; lines
//! meaningfully larger than it are heading candidates, and bold lines at body
//! size qualify only when their text also has heading shape. Candidates then
//! pass through the false-positive filters, page-0 title suppression, and a
//! size-band pass that turns distinct sizes into nesting levels.

use std::collections::HashMap;

use log::debug;

use super::filters::{HeadingFilters, LineContext};
use super::headings::Heading;
use super::options::ParseOptions;
use super::textmap::{MappedLine, TextMap};
use crate::model::{NoteStage, QualityNote};

/// Font sizes are bucketed to 0.1pt so near-identical sizes from subsetted
/// fonts land in one band.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Character-weighted modal font size. Headings are rare and short, so the
/// mode is the body text size. Ties break toward the smaller size.
pub fn body_font_size(map: &TextMap) -> f32 {
    let mut weights: HashMap<i32, usize> = HashMap::new();
    for line in &map.lines {
        let chars = map.line_text(line).chars().count();
        *weights.entry(size_key(line.font_size)).or_insert(0) += chars;
    }
    weights
        .into_iter()
        .max_by(|(ka, wa), (kb, wb)| wa.cmp(wb).then(kb.cmp(ka)))
        .map(|(key, _)| key as f32 / 10.0)
        .unwrap_or(10.0)
}

/// Run the font heuristic over the whole document.
pub fn detect_font_headings(
    map: &TextMap,
    options: &ParseOptions,
    filters: &HeadingFilters,
    notes: &mut Vec<QualityNote>,
) -> Vec<Heading> {
    let body = body_font_size(map);
    debug!("body font size {body:.1}pt");

    // The document title (plus subtitle, within 1pt) is the largest text on
    // page 0, arXiv stamp excluded. It is never a section heading.
    let title_size = map
        .lines_on_page(0)
        .filter(|line| !filters.is_arxiv_header(map.line_text(line)))
        .map(|line| line.font_size)
        .fold(0.0f32, f32::max);

    // (line, qualified by size rather than boldness alone)
    let mut candidates: Vec<(&MappedLine, bool)> = Vec::new();
    let mut seen_first_section = false;

    for line in &map.lines {
        let text = map.line_text(line);
        if text.is_empty() {
            continue;
        }

        let by_size = line.font_size > body * options.heading_size_ratio;
        let by_bold = !by_size
            && line.bold
            && line.font_size >= body * options.bold_body_ratio
            && filters.looks_like_section_heading(text);
        if !by_size && !by_bold {
            continue;
        }

        if by_size && line.page == 0 {
            if line.font_size >= title_size - 1.0 {
                continue;
            }
            // Author names and affiliations sit between the title and the
            // first section; require heading shape until one is seen.
            if !seen_first_section && !filters.looks_like_section_heading(text) {
                continue;
            }
        }

        let page_height = map
            .page_dims(line.page)
            .map(|dims| dims.height)
            .unwrap_or(0.0);
        let ctx = LineContext {
            text,
            page: line.page,
            bbox: line.bbox,
            page_height,
        };
        if let Some(rule) = filters.first_match(&ctx) {
            if options.note_filtered_headings {
                notes.push(QualityNote::new(
                    NoteStage::HeadingDetection,
                    format!("candidate {text:?} rejected by {} filter", rule.name()),
                    Some(line.page),
                ));
            }
            continue;
        }

        seen_first_section = true;
        candidates.push((line, by_size));
    }

    // Distinct sizes of size-qualified candidates, largest first, become
    // levels 1..n; bold-only candidates nest one level deeper than the
    // smallest size band.
    let mut bands: Vec<i32> = candidates
        .iter()
        .filter(|(_, by_size)| *by_size)
        .map(|(line, _)| size_key(line.font_size))
        .collect();
    bands.sort_unstable_by(|a, b| b.cmp(a));
    bands.dedup();

    candidates
        .into_iter()
        .map(|(line, by_size)| {
            let level = if by_size {
                bands
                    .iter()
                    .position(|k| *k == size_key(line.font_size))
                    .map(|i| i as u32 + 1)
                    .unwrap_or(1)
            } else {
                bands.len() as u32 + 1
            };
            Heading {
                text: map.line_text(line).to_string(),
                level,
                page: line.page,
                span: line.span,
                font_size: Some(line.font_size),
            }
        })
        .collect()
}
