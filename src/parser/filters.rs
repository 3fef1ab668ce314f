//! False-positive filters for heading detection.
//!
//! Font-size heuristics over-trigger on running headers, author blocks,
//! captions, and table rows. The filters are an ordered list of named
//! predicate rules evaluated against each candidate line, so the
//! classification logic stays auditable and each rule is testable on its
//! own.

use regex::Regex;

use crate::model::Rect;

/// Evaluation context for one candidate line.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub text: &'a str,
    pub page: usize,
    pub bbox: Rect,
    pub page_height: f32,
}

/// A single named filter rule. Order in [`HeadingFilters::RULES`] is the
/// evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Line sits in the top or bottom page margin (running header/footer).
    PageMargin,
    /// arXiv submission stamp ("arXiv:2302.13971v1 ...").
    ArxivHeader,
    /// Figure/table caption ("Figure 1: ...", "Table 2 ...").
    Caption,
    /// Too long to be a heading.
    Overlong,
    /// Colon followed by body content ("Example: the model predicted ...").
    ColonBody,
    /// Sentence-like period ending that is not a numbered section.
    SentencePeriod,
    /// Purely numeric table data ("88.0 81.1") that is not a bare section
    /// number.
    NumericRow,
    /// Author/affiliation marker symbols (∗ † ♣ ...), typical of author
    /// blocks near the document start.
    AuthorSymbols,
    /// Trailing comma, question mark, or hyphen: a broken line, not a
    /// heading.
    TrailingBreak,
}

impl FilterRule {
    pub fn name(&self) -> &'static str {
        match self {
            FilterRule::PageMargin => "page-margin",
            FilterRule::ArxivHeader => "arxiv-header",
            FilterRule::Caption => "caption",
            FilterRule::Overlong => "overlong",
            FilterRule::ColonBody => "colon-body",
            FilterRule::SentencePeriod => "sentence-period",
            FilterRule::NumericRow => "numeric-row",
            FilterRule::AuthorSymbols => "author-symbols",
            FilterRule::TrailingBreak => "trailing-break",
        }
    }
}

/// The compiled rule set.
pub struct HeadingFilters {
    margin_ratio: f32,
    arxiv_re: Regex,
    caption_re: Regex,
    numbered_section_re: Regex,
    numeric_row_re: Regex,
    section_num_re: Regex,
    numbered_heading_re: Regex,
}

impl HeadingFilters {
    /// Fixed evaluation order.
    pub const RULES: [FilterRule; 9] = [
        FilterRule::PageMargin,
        FilterRule::ArxivHeader,
        FilterRule::Caption,
        FilterRule::Overlong,
        FilterRule::ColonBody,
        FilterRule::SentencePeriod,
        FilterRule::NumericRow,
        FilterRule::AuthorSymbols,
        FilterRule::TrailingBreak,
    ];

    pub fn new(margin_ratio: f32) -> Self {
        Self {
            margin_ratio,
            arxiv_re: Regex::new(r"(?i)arXiv:\d+\.\d+").expect("valid regex"),
            caption_re: Regex::new(r"(?i)^(Figure|Table|Fig\.)\s+\d+").expect("valid regex"),
            numbered_section_re: Regex::new(r"^\d+\.\s").expect("valid regex"),
            numeric_row_re: Regex::new(r"^[\d\s.,\-+%]+$").expect("valid regex"),
            section_num_re: section_number_regex(),
            numbered_heading_re: Regex::new(r"^[A-Z]?\d*\.?\d*\s+[A-Z]").expect("valid regex"),
        }
    }

    /// First rule that rejects the line, or `None` when it survives all of
    /// them.
    pub fn first_match(&self, ctx: &LineContext) -> Option<FilterRule> {
        Self::RULES
            .iter()
            .copied()
            .find(|rule| self.rule_matches(*rule, ctx))
    }

    /// Whether the line is a false positive under any rule.
    pub fn rejects(&self, ctx: &LineContext) -> bool {
        self.first_match(ctx).is_some()
    }

    /// Whether the text is an arXiv submission stamp. Title-size detection
    /// needs this on its own: the stamp is rotated margin text that would
    /// otherwise pass for the largest line on page 0.
    pub fn is_arxiv_header(&self, text: &str) -> bool {
        self.arxiv_re.is_match(text)
    }

    /// Positive shape check: does this text look like a plausible section
    /// heading? Used where font evidence alone is weak (bold body-sized
    /// lines, page-0 lines before the first real section).
    pub fn looks_like_section_heading(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        // "1 Introduction", "2.1 Data", "A Appendix"
        if self.numbered_heading_re.is_match(text) {
            return true;
        }

        let first_upper = text.chars().next().is_some_and(|c| c.is_uppercase());
        let char_count = text.chars().count();

        // Heading keywords, only trusted for short capitalized text (body
        // text contains these words too)
        if first_upper && char_count < 40 {
            let lower = text.to_lowercase();
            if HEADING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                return true;
            }
        }

        // Bare section number: "1", "B.1"
        if self.section_num_re.is_match(text) {
            return true;
        }

        // Short capitalized text without mid-sentence punctuation. Multi-word
        // text must also look title-cased: the last substantive word should
        // be capitalized, which separates headings from body fragments.
        if char_count < 50 && first_upper && !text.ends_with('.') && !text.contains(". ") {
            let words: Vec<&str> = text.split_whitespace().collect();
            if words.len() <= 3 {
                return true;
            }
            let substantive: Vec<&str> = words
                .iter()
                .copied()
                .filter(|w| w.chars().count() > 3 && w.chars().all(|c| c.is_alphabetic()))
                .collect();
            if let Some(last) = substantive.last() {
                return last.chars().next().is_some_and(|c| c.is_uppercase());
            }
        }

        false
    }

    fn rule_matches(&self, rule: FilterRule, ctx: &LineContext) -> bool {
        let text = ctx.text;
        match rule {
            FilterRule::PageMargin => {
                if ctx.page_height <= 0.0 {
                    return false;
                }
                let band = ctx.page_height * self.margin_ratio;
                let center = (ctx.bbox.y0 + ctx.bbox.y1) / 2.0;
                center < band || center > ctx.page_height - band
            }
            FilterRule::ArxivHeader => self.arxiv_re.is_match(text),
            FilterRule::Caption => self.caption_re.is_match(text),
            FilterRule::Overlong => text.chars().count() > 80,
            FilterRule::ColonBody => match text.find(": ") {
                Some(idx) => text.len() - idx > 4,
                None => false,
            },
            FilterRule::SentencePeriod => {
                (text.ends_with('.') && !self.numbered_section_re.is_match(text))
                    || (text.contains(". ") && text.chars().count() > 60)
            }
            FilterRule::NumericRow => {
                if !self.numeric_row_re.is_match(text) {
                    return false;
                }
                let stripped = text.trim();
                // Short section numbers ("3", "4.1") are fine
                !(self.section_num_re.is_match(stripped) && stripped.len() <= 3)
            }
            FilterRule::AuthorSymbols => text.chars().any(|c| "∗†♣♢♠♦♯♮".contains(c)),
            FilterRule::TrailingBreak => {
                text.ends_with(',') || text.ends_with('?') || text.ends_with('-')
            }
        }
    }
}

/// Bare section-number pattern: "1", "2.1", "A", "A.1".
pub fn section_number_regex() -> Regex {
    Regex::new(r"^[A-Z]?\.?\d*\.?\d*$").expect("valid regex")
}

const HEADING_KEYWORDS: [&str; 24] = [
    "abstract",
    "introduction",
    "related work",
    "background",
    "method",
    "approach",
    "model",
    "experiment",
    "result",
    "discussion",
    "conclusion",
    "acknowledgement",
    "reference",
    "appendix",
    "supplementary",
    "evaluation",
    "analysis",
    "limitation",
    "future work",
    "overview",
    "preliminar",
    "setup",
    "dataset",
    "training",
];
