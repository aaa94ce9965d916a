//! Error types for saxo.
//!
//! Every fatal condition of a parse run (tokenizer errors, I/O failures,
//! truncated documents) is collapsed into a single `SaxoError` so the entry
//! points can report it through one channel.

use thiserror::Error;

/// Main error type for the saxo library.
#[derive(Debug, Error)]
pub enum SaxoError {
    /// The tokenizer rejected the document (mismatched end tag, bad syntax, ...).
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A tag name or CDATA section is not valid UTF-8.
    #[error("Invalid UTF-8 in XML input: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Input ended while elements were still open.
    #[error("Unexpected end of input: <{name}> is not closed")]
    UnclosedTag { name: String },

    /// Character data appeared before the root element or after it closed.
    #[error("Text data outside of root element")]
    TextOutsideRoot,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Extraction pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Result type alias for saxo operations.
pub type Result<T> = std::result::Result<T, SaxoError>;
