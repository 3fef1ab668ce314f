//! Error types for the paperstruct library.

use std::io;
use thiserror::Error;

/// Result type alias for paperstruct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during structure extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing persisted documents.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input has no pages or no extractable text.
    ///
    /// Structural failures are fatal: no partial document is produced.
    #[error("Empty document: {0}")]
    EmptyDocument(String),

    /// A span refers to offsets outside `raw_text`.
    #[error("Span {start}..{end} out of bounds (text length {len})")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Error serializing or deserializing a persisted document.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unknown ref id passed to a registry lookup.
    #[error("Unknown ref id: {0}")]
    UnknownRef(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
