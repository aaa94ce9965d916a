//! Configuration constants, tokenizer options and pattern validation.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SaxoError};

/// Initial capacity of the event buffer used by the streaming entry points.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Pattern segment that matches any single element name.
pub const WILDCARD_SEGMENT: &str = "*";

/// Separator between segments of an extraction pattern.
pub const PATH_SEPARATOR: char = '/';

/// A single pattern segment: the wildcard or an XML-ish element name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*|[A-Za-z_][A-Za-z0-9_.:\-]*)$").expect("valid regex")
});

/// Options applied to text events before they reach the dispatch core.
///
/// The defaults reproduce a tokenizer running with trimming and whitespace
/// normalization enabled: whitespace-only text is dropped and runs of
/// whitespace collapse into a single space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip leading/trailing whitespace and drop whitespace-only text.
    pub trim_text: bool,

    /// Collapse internal whitespace runs into a single space.
    pub normalize_whitespace: bool,
}

impl ParseOptions {
    /// Create options with trimming and normalization enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trim_text: true,
            normalize_whitespace: true,
        }
    }

    /// Set whether text is trimmed.
    #[must_use]
    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    /// Set whether whitespace inside text is normalized.
    #[must_use]
    pub fn with_normalize_whitespace(mut self, normalize: bool) -> Self {
        self.normalize_whitespace = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an extraction pattern and split it into segments.
///
/// # Arguments
/// * `pattern` - Slash-separated element names, `*` matching any element
///
/// # Returns
/// * `Ok(segments)` if every segment is a wildcard or a plausible element name
/// * `Err(SaxoError::InvalidPattern)` otherwise
///
/// # Examples
/// ```
/// use saxo::config::validate_pattern;
///
/// assert_eq!(validate_pattern("book/*").unwrap(), vec!["book", "*"]);
/// assert!(validate_pattern("book//title").is_err());
/// ```
pub fn validate_pattern(pattern: &str) -> Result<Vec<&str>> {
    let trimmed = pattern.trim_matches(PATH_SEPARATOR);
    if trimmed.is_empty() {
        return Err(SaxoError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern has no segments".to_string(),
        });
    }

    let segments: Vec<&str> = trimmed.split(PATH_SEPARATOR).collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(SaxoError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "empty segment".to_string(),
            });
        }
        if !SEGMENT_PATTERN.is_match(segment) {
            return Err(SaxoError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("'{segment}' is not an element name or '{WILDCARD_SEGMENT}'"),
            });
        }
    }

    Ok(segments)
}
