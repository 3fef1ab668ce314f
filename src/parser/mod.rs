//! The extraction pipeline and its stages.
//!
//! [`pipeline::run`] wires the stages together; the individual modules are
//! exported for callers that want to run a stage in isolation (for example
//! a text map plus the coordinate mapper, without heading detection).

mod filters;
mod fonts;
mod headings;
mod links;
mod options;
mod outline;
pub(crate) mod pipeline;
mod sections;
mod sentences;
mod textmap;

pub use filters::{FilterRule, HeadingFilters, LineContext};
pub use fonts::{body_font_size, detect_font_headings};
pub use headings::{resolve_headings, Heading, ResolvedHeadings};
pub use links::{anchor_links, expand_indices, extract_links};
pub use options::ParseOptions;
pub use outline::{resolve_outline, OutlineResolution};
pub use sections::{segment_sections, FRONT_MATTER, FULL_DOCUMENT};
pub use sentences::split_sentences;
pub use textmap::{MappedLine, TextMap};
