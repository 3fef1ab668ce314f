//! Link extraction: external URLs, in-document jumps, and citations.
//!
//! Two sources feed the link list. Reader annotations give hyperlinked
//! targets, including the `cite.<key>` named destinations LaTeX PDFs use
//! for bibliography links. The document text gives numeric citation
//! markers ("[1]", "[2, 3]", "[1-5]") whether or not they are hyperlinked.
//! Author-year citations without a named destination are not detected.

use log::debug;
use regex::Regex;

use super::textmap::TextMap;
use crate::input::{AnnotationTarget, LinkAnnotation, PdfContent};
use crate::mapper::CoordinateMapper;
use crate::model::{
    walk_sections, Link, LinkAnchor, LinkTarget, NoteStage, QualityNote, Section, Span,
};

pub fn extract_links(
    map: &TextMap,
    content: &PdfContent,
    notes: &mut Vec<QualityNote>,
) -> Vec<Link> {
    let mapper = CoordinateMapper::new(map);
    let mut links = Vec::new();
    let mut seen_urls: Vec<String> = Vec::new();
    let mut named_in_order: Vec<(&str, &LinkAnnotation)> = Vec::new();

    for annotation in &content.annotations {
        match &annotation.target {
            AnnotationTarget::Uri { url } => {
                if url.is_empty() || seen_urls.iter().any(|u| u == url) {
                    continue;
                }
                let Some((text, span)) = anchor_for(map, annotation) else {
                    drop_note(notes, annotation, "external link");
                    continue;
                };
                seen_urls.push(url.clone());
                links.push(Link::new(
                    LinkTarget::External { url: url.clone() },
                    text,
                    annotation.page,
                    span,
                ));
            }
            AnnotationTarget::Page { page } => {
                let Some((text, span)) = anchor_for(map, annotation) else {
                    drop_note(notes, annotation, "page link");
                    continue;
                };
                links.push(Link::new(
                    LinkTarget::Internal {
                        dest: String::new(),
                        target_page: Some(*page),
                    },
                    text,
                    annotation.page,
                    span,
                ));
            }
            AnnotationTarget::Named { dest, .. } => {
                if !dest.is_empty() {
                    named_in_order.push((dest, annotation));
                }
            }
        }
    }

    links.extend(named_links(map, &mapper, &named_in_order, notes));
    links.extend(citation_markers(map, notes));
    debug!("extracted {} links", links.len());
    links
}

/// Process named-destination annotations. Citation anchors are often split
/// across fragments ("(Kingma & Ba," then "2015)"), so consecutive
/// annotations with the same destination on the same page are merged into
/// one link. Citation destinations keep every occurrence; other named links
/// dedup by destination.
fn named_links(
    map: &TextMap,
    mapper: &CoordinateMapper,
    named: &[(&str, &LinkAnnotation)],
    notes: &mut Vec<QualityNote>,
) -> Vec<Link> {
    let comma_space = Regex::new(r",\s+").expect("valid regex");
    let space_paren = Regex::new(r"\s+\)").expect("valid regex");

    let mut links = Vec::new();
    let mut seen_dests: Vec<String> = Vec::new();

    let mut i = 0;
    while i < named.len() {
        let (dest, first) = named[i];
        let mut j = i + 1;
        while j < named.len() && named[j].0 == dest && named[j].1.page == first.page {
            j += 1;
        }
        let group = &named[i..j];
        i = j;

        let mut parts: Vec<&str> = Vec::new();
        let mut spans: Vec<Span> = Vec::new();
        for (_, fragment) in group {
            if let Some(span) = mapper.box_to_span(fragment.page, fragment.bbox) {
                let text = span.slice(&map.raw_text).trim();
                if !text.is_empty() {
                    parts.push(text);
                }
                spans.push(span);
            }
        }
        let Some(first_span) = spans.first().copied() else {
            drop_note(notes, first, "named link");
            continue;
        };
        // Union of first and last fragment spans covers citations wrapped
        // across lines.
        let last_end = spans.last().map(|s| s.end).unwrap_or(first_span.end);
        let span = Span::new(first_span.start, first_span.end.max(last_end));

        let text = parts.join(" ");
        let text = comma_space.replace_all(&text, ", ");
        let text = space_paren.replace_all(&text, ")");

        let is_citation = dest.starts_with("cite.");
        if !is_citation && seen_dests.iter().any(|d| d == dest) {
            continue;
        }
        seen_dests.push(dest.to_string());

        let target_page = match &first.target {
            AnnotationTarget::Named { page, .. } => Some(*page),
            _ => None,
        };
        let target = if is_citation {
            LinkTarget::Citation {
                indices: Vec::new(),
                dest: Some(dest.to_string()),
            }
        } else {
            LinkTarget::Internal {
                dest: dest.to_string(),
                target_page,
            }
        };
        links.push(Link::new(target, text.into_owned(), first.page, span));
    }

    links
}

/// The widest range a well-formed marker expands to; "[1-500]" is a
/// misparsed table cell, not a citation.
const MAX_RANGE_SPAN: u32 = 100;

/// Numeric citation markers in the document text. Repeated markers (the
/// same "[3]" cited twice) keep only their first occurrence; markers with
/// descending or overlong ranges are dropped with a note.
fn citation_markers(map: &TextMap, notes: &mut Vec<QualityNote>) -> Vec<Link> {
    let marker_re = Regex::new(r"\[(\d+(?:\s*[,;\u{2013}-]\s*\d+)*)\]").expect("valid regex");

    let mut links = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for m in marker_re.find_iter(&map.raw_text) {
        let marker = m.as_str();
        if seen.contains(&marker) {
            continue;
        }
        seen.push(marker);

        let span = Span::new(m.start(), m.end());
        let page = map.page_of_offset(span.start);
        let inner = &marker[1..marker.len() - 1];
        let Some(indices) = expand_indices(inner) else {
            notes.push(QualityNote::new(
                NoteStage::Links,
                format!("citation marker {marker} has an invalid range; dropped"),
                Some(page),
            ));
            continue;
        };
        links.push(Link::new(
            LinkTarget::Citation { indices, dest: None },
            marker,
            page,
            span,
        ));
    }

    links
}

/// Expand a marker's inner text to reference indices: "2, 3" to [2, 3],
/// "1-5" to [1, 2, 3, 4, 5]. Descending or overlong ranges are invalid.
pub fn expand_indices(inner: &str) -> Option<Vec<u32>> {
    let token_re = Regex::new(r"\d+|[,;]|[\u{2013}-]").expect("valid regex");

    let mut out = Vec::new();
    let mut prev: Option<u32> = None;
    let mut range_open = false;

    for token in token_re.find_iter(inner) {
        match token.as_str() {
            "," | ";" => range_open = false,
            "-" | "\u{2013}" => range_open = prev.is_some(),
            number => {
                let n = number.parse::<u32>().ok()?;
                if range_open {
                    let p = prev?;
                    if n <= p || n - p > MAX_RANGE_SPAN {
                        return None;
                    }
                    out.extend(p + 1..=n);
                } else {
                    out.push(n);
                }
                range_open = false;
                prev = Some(n);
            }
        }
    }
    Some(out)
}

/// Resolve each link to its enclosing section (and sentence, when a single
/// sentence fully contains the anchor). Sections are addressed by their
/// depth-first document-order index.
pub fn anchor_links(links: &mut [Link], sections: &[Section]) {
    for link in links {
        link.anchor = find_anchor(link.span, sections);
    }
}

fn find_anchor(span: Span, sections: &[Section]) -> Option<LinkAnchor> {
    for (index, section) in walk_sections(sections).enumerate() {
        if !section.span.contains_offset(span.start) {
            continue;
        }
        let sentence = section
            .sentences
            .iter()
            .position(|s| s.span.contains(&span));
        return Some(LinkAnchor {
            section: index,
            sentence,
        });
    }
    None
}

/// First line on the annotation's page that intersects its rectangle.
fn anchor_for(map: &TextMap, annotation: &LinkAnnotation) -> Option<(String, Span)> {
    map.lines_on_page(annotation.page)
        .find(|line| line.bbox.intersects(&annotation.bbox))
        .map(|line| (map.line_text(line).to_string(), line.span))
}

fn drop_note(notes: &mut Vec<QualityNote>, annotation: &LinkAnnotation, what: &str) {
    notes.push(QualityNote::new(
        NoteStage::Links,
        format!("{what} on page {} has no anchoring text; dropped", annotation.page),
        Some(annotation.page),
    ));
}
