//! Section segmentation: turn the ordered heading list into a tree.
//!
//! A heading at level L closes every open section at level >= L. A section's
//! own-content span runs from the end of its heading line to the next heading
//! of any level, so descendant text lives in descendant sections, never in
//! the parent's own span.

use super::headings::Heading;
use super::textmap::TextMap;
use crate::model::{Section, Span};

/// Heading text used for content before the first heading.
pub const FRONT_MATTER: &str = "(Front Matter)";

/// Heading text used when no headings were detected at all.
pub const FULL_DOCUMENT: &str = "(Full Document)";

pub fn segment_sections(map: &TextMap, headings: &[Heading]) -> Vec<Section> {
    let len = map.raw_text.len();

    if headings.is_empty() {
        let mut all = Section::new(FULL_DOCUMENT, 1, Span::new(0, 0), Span::new(0, len));
        all.page_start = 0;
        all.page_end = map.pages.len().saturating_sub(1);
        return vec![all];
    }

    let mut roots: Vec<Section> = Vec::new();
    let mut stack: Vec<Section> = Vec::new();

    let first_start = headings[0].span.start;
    if first_start > 0 {
        let end = trim_newline(&map.raw_text, first_start);
        if end > 0 {
            let mut front = Section::new(FRONT_MATTER, 1, Span::new(0, 0), Span::new(0, end));
            front.page_start = 0;
            front.page_end = map.page_of_offset(end.saturating_sub(1));
            roots.push(front);
        }
    }

    for (i, heading) in headings.iter().enumerate() {
        while stack.last().is_some_and(|open| open.level >= heading.level) {
            close_top(&mut stack, &mut roots);
        }

        let next_start = headings
            .get(i + 1)
            .map(|next| next.span.start)
            .unwrap_or(len);
        let content_start = skip_newline(&map.raw_text, heading.span.end).min(next_start);
        let content_end = trim_newline(&map.raw_text, next_start).max(content_start);

        let mut section = Section::new(
            heading.text.clone(),
            heading.level,
            heading.span,
            Span::new(content_start, content_end),
        );
        section.page_start = heading.page;
        section.page_end = if content_end > content_start {
            map.page_of_offset(content_end - 1)
        } else {
            heading.page
        };
        stack.push(section);
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    propagate_page_end(&mut roots);
    roots
}

fn close_top(stack: &mut Vec<Section>, roots: &mut Vec<Section>) {
    if let Some(section) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(section),
            None => roots.push(section),
        }
    }
}

/// A parent's page range covers its descendants.
fn propagate_page_end(sections: &mut [Section]) {
    for section in sections {
        propagate_page_end(&mut section.children);
        if let Some(last) = section.children.last() {
            section.page_end = section.page_end.max(last.page_end);
        }
    }
}

/// Step past the line separator after a heading.
fn skip_newline(text: &str, offset: usize) -> usize {
    if text.as_bytes().get(offset) == Some(&b'\n') {
        offset + 1
    } else {
        offset
    }
}

/// Drop the line separator before the next heading.
fn trim_newline(text: &str, offset: usize) -> usize {
    if offset > 0 && text.as_bytes().get(offset - 1) == Some(&b'\n') {
        offset - 1
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PageContent, PdfContent, TextLine};
    use crate::model::{walk_sections, Rect};

    fn build_map(pages: Vec<Vec<&str>>) -> TextMap {
        let pages = pages
            .into_iter()
            .map(|lines| {
                PageContent::with_lines(
                    612.0,
                    792.0,
                    lines
                        .into_iter()
                        .enumerate()
                        .map(|(i, t)| {
                            let y = 100.0 + i as f32 * 14.0;
                            TextLine::new(t, 11.0, false, Rect::new(72.0, y, 540.0, y + 11.0))
                        })
                        .collect(),
                )
            })
            .collect();
        TextMap::build(&PdfContent::new(pages)).unwrap()
    }

    fn heading_at(map: &TextMap, text: &str, level: u32) -> Heading {
        let start = map.raw_text.find(text).expect("heading text present");
        let line = map
            .lines
            .iter()
            .find(|l| l.span.contains_offset(start))
            .expect("line for heading");
        Heading {
            text: text.to_string(),
            level,
            page: line.page,
            span: Span::new(start, start + text.len()),
            font_size: None,
        }
    }

    #[test]
    fn test_no_headings_gives_full_document() {
        let map = build_map(vec![vec!["Just some text.", "And some more."]]);
        let sections = segment_sections(&map, &[]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, FULL_DOCUMENT);
        assert_eq!(sections[0].span, Span::new(0, map.raw_text.len()));
    }

    #[test]
    fn test_front_matter_before_first_heading() {
        let map = build_map(vec![vec![
            "Paper Title",
            "Author One, Author Two",
            "1 Introduction",
            "Intro text.",
        ]]);
        let headings = vec![heading_at(&map, "1 Introduction", 1)];
        let sections = segment_sections(&map, &headings);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, FRONT_MATTER);
        assert_eq!(
            sections[0].content(&map.raw_text),
            "Paper Title\nAuthor One, Author Two"
        );
        assert_eq!(sections[1].heading, "1 Introduction");
        assert_eq!(sections[1].content(&map.raw_text), "Intro text.");
    }

    #[test]
    fn test_nesting_and_own_content() {
        let map = build_map(vec![vec![
            "1 Methods",
            "Overview of the methods.",
            "1.1 Data",
            "Data description.",
            "1.2 Training",
            "Training description.",
            "2 Results",
            "Results text.",
        ]]);
        let headings = vec![
            heading_at(&map, "1 Methods", 1),
            heading_at(&map, "1.1 Data", 2),
            heading_at(&map, "1.2 Training", 2),
            heading_at(&map, "2 Results", 1),
        ];
        let sections = segment_sections(&map, &headings);
        assert_eq!(sections.len(), 2);

        let methods = &sections[0];
        assert_eq!(methods.children.len(), 2);
        // Own content stops at the first child heading
        assert_eq!(methods.content(&map.raw_text), "Overview of the methods.");
        assert_eq!(methods.children[0].content(&map.raw_text), "Data description.");
        assert_eq!(methods.children[1].content(&map.raw_text), "Training description.");
        assert_eq!(sections[1].content(&map.raw_text), "Results text.");

        // Subtree span of the parent contains every descendant span
        let subtree = methods.subtree_span();
        for child in &methods.children {
            assert!(subtree.contains(&child.subtree_span()));
        }
    }

    #[test]
    fn test_level_jump_closes_all_deeper_sections() {
        let map = build_map(vec![vec![
            "1 Intro",
            "Text a.",
            "1.1 Sub",
            "Text b.",
            "1.1.1 Subsub",
            "Text c.",
            "2 Next",
            "Text d.",
        ]]);
        let headings = vec![
            heading_at(&map, "1 Intro", 1),
            heading_at(&map, "1.1 Sub", 2),
            heading_at(&map, "1.1.1 Subsub", 3),
            heading_at(&map, "2 Next", 1),
        ];
        let sections = segment_sections(&map, &headings);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].heading, "2 Next");
        assert_eq!(sections[0].children[0].children[0].heading, "1.1.1 Subsub");
    }

    #[test]
    fn test_empty_section_between_adjacent_headings() {
        let map = build_map(vec![vec!["1 First", "2 Second", "Body."]]);
        let headings = vec![
            heading_at(&map, "1 First", 1),
            heading_at(&map, "2 Second", 1),
        ];
        let sections = segment_sections(&map, &headings);
        assert_eq!(sections[0].content(&map.raw_text), "");
        assert!(sections[0].span.is_empty());
        assert_eq!(sections[1].content(&map.raw_text), "Body.");
    }

    #[test]
    fn test_depth_first_walk_order() {
        let map = build_map(vec![vec![
            "1 A", "x.", "1.1 B", "y.", "2 C", "z.",
        ]]);
        let headings = vec![
            heading_at(&map, "1 A", 1),
            heading_at(&map, "1.1 B", 2),
            heading_at(&map, "2 C", 1),
        ];
        let sections = segment_sections(&map, &headings);
        let order: Vec<&str> = walk_sections(&sections)
            .map(|s| s.heading.as_str())
            .collect();
        assert_eq!(order, vec!["1 A", "1.1 B", "2 C"]);
    }
}
