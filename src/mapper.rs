//! Coordinate mapping between character spans and page geometry.
//!
//! Line bounding boxes are the finest geometry the reader provides, so
//! positions inside a line are interpolated proportionally over its
//! character count. That makes the mapping approximate for non-uniform
//! glyph widths but deterministic and bidirectional.

use crate::model::{PageBox, Rect, Span};
use crate::parser::{MappedLine, TextMap};
use crate::{Error, Result};

/// A text search hit with its resolved geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    pub span: Span,
    pub boxes: Vec<PageBox>,
}

/// Maps spans to page boxes and back over one document's text map.
pub struct CoordinateMapper<'a> {
    map: &'a TextMap,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(map: &'a TextMap) -> Self {
        Self { map }
    }

    /// Bounding boxes covering a span, one per intersected line.
    pub fn span_to_boxes(&self, span: Span) -> Result<Vec<PageBox>> {
        let len = self.map.raw_text.len();
        if span.end > len || span.start > span.end {
            return Err(Error::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }

        let mut boxes = Vec::new();
        for line in &self.map.lines {
            if !line.span.overlaps(&span) {
                continue;
            }
            let dims = self.map.page_dims(line.page)?;
            let rect = self.slice_rect(line, span);
            boxes.push(PageBox::new(line.page, rect, dims.width, dims.height));
        }
        Ok(boxes)
    }

    /// Span of the text inside a page rectangle, or `None` when the
    /// rectangle touches no text.
    pub fn box_to_span(&self, page: usize, rect: Rect) -> Option<Span> {
        let mut start = usize::MAX;
        let mut end = 0usize;

        for line in self.map.lines_on_page(page) {
            if !line.bbox.intersects(&rect) {
                continue;
            }
            let s = self.offset_at(line, rect.x0.max(line.bbox.x0), false);
            let e = self.offset_at(line, rect.x1.min(line.bbox.x1), true);
            start = start.min(s);
            end = end.max(e);
        }

        (start < end).then(|| Span::new(start, end))
    }

    /// Case-insensitive substring search over the document text.
    pub fn find_text(&self, query: &str) -> Vec<TextMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let haystack = &self.map.raw_text;
        // Case folding can change byte lengths, so the fold runs char by
        // char with every folded byte traced back to its original offset.
        let mut folded = String::with_capacity(haystack.len());
        let mut origins = Vec::with_capacity(haystack.len());
        for (offset, c) in haystack.char_indices() {
            for lc in c.to_lowercase() {
                for _ in 0..lc.len_utf8() {
                    origins.push(offset);
                }
                folded.push(lc);
            }
        }
        let needle: String = query.chars().flat_map(char::to_lowercase).collect();

        let mut matches = Vec::new();
        let mut from = 0usize;
        while let Some(pos) = folded[from..].find(&needle) {
            let fold_start = from + pos;
            let fold_end = fold_start + needle.len();
            let start = origins[fold_start];
            let end = if fold_end == folded.len() {
                haystack.len()
            } else {
                origins[fold_end]
            };
            let span = Span::new(start, end);
            let boxes = self.span_to_boxes(span).unwrap_or_default();
            matches.push(TextMatch { span, boxes });
            from = fold_end.max(fold_start + 1);
        }
        matches
    }

    /// Rectangle covering the part of `line` that lies inside `span`.
    fn slice_rect(&self, line: &MappedLine, span: Span) -> Rect {
        let s = span.start.max(line.span.start);
        let e = span.end.min(line.span.end);
        Rect::new(
            self.x_at(line, s),
            line.bbox.y0,
            self.x_at(line, e),
            line.bbox.y1,
        )
    }

    /// X coordinate of a character offset within a line, by proportional
    /// interpolation over the character count.
    fn x_at(&self, line: &MappedLine, offset: usize) -> f32 {
        let text = self.map.line_text(line);
        let total = text.chars().count();
        if total == 0 {
            return line.bbox.x0;
        }
        let rel = offset.saturating_sub(line.span.start).min(text.len());
        let chars_before = text[..rel].chars().count();
        let t = chars_before as f32 / total as f32;
        line.bbox.x0 + (line.bbox.x1 - line.bbox.x0) * t
    }

    /// Character offset of an x coordinate within a line. `round_up` biases
    /// toward including the character under the boundary.
    fn offset_at(&self, line: &MappedLine, x: f32, round_up: bool) -> usize {
        let text = self.map.line_text(line);
        let total = text.chars().count();
        let width = line.bbox.x1 - line.bbox.x0;
        if total == 0 || width <= 0.0 {
            return if round_up { line.span.end } else { line.span.start };
        }
        let t = ((x - line.bbox.x0) / width).clamp(0.0, 1.0);
        let chars = if round_up {
            (t * total as f32).ceil() as usize
        } else {
            (t * total as f32).floor() as usize
        };
        let byte = text
            .char_indices()
            .nth(chars.min(total))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        line.span.start + byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PageContent, PdfContent, TextLine};

    fn map_one_line(text: &str) -> TextMap {
        let pages = vec![PageContent::with_lines(
            612.0,
            792.0,
            vec![TextLine::new(text, 11.0, false, Rect::new(100.0, 200.0, 300.0, 211.0))],
        )];
        TextMap::build(&PdfContent::new(pages)).unwrap()
    }

    #[test]
    fn test_span_to_boxes_interpolates() {
        // 10 chars over 200pt: 20pt per char
        let map = map_one_line("0123456789");
        let mapper = CoordinateMapper::new(&map);
        let boxes = mapper.span_to_boxes(Span::new(2, 5)).unwrap();
        assert_eq!(boxes.len(), 1);
        let rect = boxes[0].rect;
        assert!((rect.x0 - 140.0).abs() < 0.01);
        assert!((rect.x1 - 200.0).abs() < 0.01);
        assert_eq!(boxes[0].page, 0);
    }

    #[test]
    fn test_box_to_span_inverts() {
        let map = map_one_line("0123456789");
        let mapper = CoordinateMapper::new(&map);
        let span = mapper
            .box_to_span(0, Rect::new(140.0, 200.0, 200.0, 211.0))
            .unwrap();
        assert_eq!(span, Span::new(2, 5));
    }

    #[test]
    fn test_box_misses_text() {
        let map = map_one_line("0123456789");
        let mapper = CoordinateMapper::new(&map);
        assert!(mapper.box_to_span(0, Rect::new(400.0, 600.0, 500.0, 650.0)).is_none());
    }

    #[test]
    fn test_span_out_of_bounds() {
        let map = map_one_line("short");
        let mapper = CoordinateMapper::new(&map);
        let err = mapper.span_to_boxes(Span::new(0, 1000)).unwrap_err();
        assert!(matches!(err, Error::SpanOutOfBounds { .. }));
    }

    #[test]
    fn test_find_text_case_insensitive() {
        let map = map_one_line("The Transformer model");
        let mapper = CoordinateMapper::new(&map);
        let hits = mapper.find_text("transformer");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span.slice(&map.raw_text), "Transformer");
        assert_eq!(hits[0].boxes.len(), 1);
    }

    #[test]
    fn test_find_text_survives_length_changing_fold() {
        // Lowercasing 'İ' grows by a byte; hits after it must still carry
        // offsets into the original text
        let map = map_one_line("The İstanbul VENUE hosted it");
        let mapper = CoordinateMapper::new(&map);

        let hits = mapper.find_text("venue");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span.slice(&map.raw_text), "VENUE");
        assert_eq!(hits[0].boxes.len(), 1);

        let hits = mapper.find_text("İstanbul");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span.slice(&map.raw_text), "İstanbul");
    }

    #[test]
    fn test_span_across_lines_yields_multiple_boxes() {
        let pages = vec![PageContent::with_lines(
            612.0,
            792.0,
            vec![
                TextLine::new("first line", 11.0, false, Rect::new(72.0, 100.0, 272.0, 111.0)),
                TextLine::new("second line", 11.0, false, Rect::new(72.0, 120.0, 292.0, 131.0)),
            ],
        )];
        let map = TextMap::build(&PdfContent::new(pages)).unwrap();
        let mapper = CoordinateMapper::new(&map);
        // Spans the newline between the lines
        let boxes = mapper.span_to_boxes(Span::new(6, 17)).unwrap();
        assert_eq!(boxes.len(), 2);
    }
}
