//! Parsing options and tunable thresholds.

/// Options for the structure-extraction pipeline.
///
/// Defaults reproduce the documented heuristics; they are exposed mainly so
/// tests and unusual templates can adjust individual thresholds.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Minimum number of embedded outline entries for the outline strategy
    /// to be considered usable at all.
    pub min_outline_entries: usize,

    /// How many pages after an entry's target page the outline resolver
    /// scans, to tolerate off-by-one page indices.
    pub outline_page_tolerance: usize,

    /// A line is a size-based heading candidate when its font size exceeds
    /// `body_size * heading_size_ratio`.
    pub heading_size_ratio: f32,

    /// Bold lines at `body_size * bold_body_ratio` or larger can be heading
    /// candidates of the deepest level.
    pub bold_body_ratio: f32,

    /// Fraction of the page height treated as top/bottom margin; lines whose
    /// box sits inside either band are running headers/footers.
    pub margin_ratio: f32,

    /// Record a quality note for every heading candidate rejected by a
    /// false-positive filter. Off by default (noisy on table-heavy papers).
    pub note_filtered_headings: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_outline_entries(mut self, n: usize) -> Self {
        self.min_outline_entries = n;
        self
    }

    pub fn with_outline_page_tolerance(mut self, pages: usize) -> Self {
        self.outline_page_tolerance = pages;
        self
    }

    pub fn with_heading_size_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    pub fn with_margin_ratio(mut self, ratio: f32) -> Self {
        self.margin_ratio = ratio;
        self
    }

    pub fn with_note_filtered_headings(mut self, enabled: bool) -> Self {
        self.note_filtered_headings = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_outline_entries: 3,
            outline_page_tolerance: 1,
            heading_size_ratio: 1.15,
            bold_body_ratio: 0.95,
            margin_ratio: 0.05,
            note_filtered_headings: false,
        }
    }
}
