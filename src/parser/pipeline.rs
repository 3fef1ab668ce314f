//! The extraction pipeline: reader snapshot in, structured document out.
//!
//! Stages run strictly in order over one immutable text map; nothing is
//! shared between invocations, so identical input gives an identical
//! document.

use log::{debug, info};

use super::filters::HeadingFilters;
use super::headings::resolve_headings;
use super::links::{anchor_links, extract_links};
use super::options::ParseOptions;
use super::sections::segment_sections;
use super::sentences::split_sentences;
use super::textmap::TextMap;
use crate::input::PdfContent;
use crate::model::{
    order_and_label, Document, LayoutDetector, Metadata, QualityNote, Section, Sentence,
};
use crate::Result;

pub fn run(
    content: &PdfContent,
    options: &ParseOptions,
    detector: Option<&dyn LayoutDetector>,
) -> Result<Document> {
    let map = TextMap::build(content)?;
    let filters = HeadingFilters::new(options.margin_ratio);
    let mut notes: Vec<QualityNote> = Vec::new();

    let resolved = resolve_headings(&map, content, options, &filters, &mut notes);
    info!(
        "detected {} headings via {:?}",
        resolved.headings.len(),
        resolved.source
    );

    let mut sections = segment_sections(&map, &resolved.headings);
    fill_sentences(&mut sections, &map);

    let mut links = extract_links(&map, content, &mut notes);
    links.sort_by_key(|link| link.span.start);
    anchor_links(&mut links, &sections);

    let layout = match detector {
        Some(detector) => order_and_label(detector.detect()?),
        None => Vec::new(),
    };

    let metadata = extract_metadata(&map, content, &filters);
    debug!("title: {:?}", metadata.title);

    Ok(Document {
        metadata,
        raw_text: map.raw_text,
        pages: map.pages,
        sections,
        links,
        layout,
        heading_source: resolved.source,
        notes,
    })
}

fn fill_sentences(sections: &mut [Section], map: &TextMap) {
    for section in sections {
        section.sentences = split_sentences(section.content(&map.raw_text), section.span.start)
            .into_iter()
            .map(|span| Sentence::new(span, map.page_of_offset(span.start)))
            .collect();
        fill_sentences(&mut section.children, map);
    }
}

/// Title is the largest-font line on page 0, arXiv stamp excluded, falling
/// back to the reader-supplied metadata title.
fn extract_metadata(map: &TextMap, content: &PdfContent, filters: &HeadingFilters) -> Metadata {
    let title = map
        .lines_on_page(0)
        .filter(|line| !filters.is_arxiv_header(map.line_text(line)))
        .max_by(|a, b| a.font_size.total_cmp(&b.font_size))
        .map(|line| map.line_text(line).to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| content.source.title.clone())
        .unwrap_or_default();

    let authors = content
        .source
        .author
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect();

    Metadata {
        title,
        authors,
        source_id: content.source.id.clone(),
        url: content.source.url.clone().unwrap_or_default(),
    }
}
