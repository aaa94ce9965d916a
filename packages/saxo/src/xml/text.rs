//! Text event cleanup.

use crate::config::ParseOptions;

/// Apply trimming and whitespace normalization to a text event.
///
/// # Arguments
/// * `raw` - Unescaped text as reported by the tokenizer
/// * `options` - Which cleanups to apply
///
/// # Returns
/// The cleaned text, or `None` when nothing is left to deliver
///
/// # Examples
/// ```
/// use saxo::config::ParseOptions;
/// use saxo::xml::prepare_text;
///
/// let options = ParseOptions::default();
/// assert_eq!(prepare_text("  text1\n   text2 ", &options).as_deref(), Some("text1 text2"));
/// assert_eq!(prepare_text(" \n\t ", &options), None);
/// ```
pub fn prepare_text(raw: &str, options: &ParseOptions) -> Option<String> {
    let text = if options.trim_text { raw.trim() } else { raw };

    let text = if options.normalize_whitespace {
        collapse_whitespace(text)
    } else {
        text.to_string()
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Replace every run of whitespace with a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push(' ');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }

    result
}
