//! Path-pattern extraction built on the handler tree.
//!
//! Patterns such as `book/title` or `catalog/*` are compiled into a
//! [`HandlerNode`] tree whose close callbacks record a [`Match`]. Segments are
//! matched through the handler tree, so elements not named by any pattern are
//! transparent: `book/title` matches `<catalog><book><title>` as well.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::config::{validate_pattern, ParseOptions, PATH_SEPARATOR, WILDCARD_SEGMENT};
use crate::error::Result;
use crate::parser::Saxo;
use crate::registry::{HandlerNode, Tag, TagContext};

/// An element that closed at the end of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Names of the matched ancestors and the element, joined with `/`.
    pub path: String,
    /// Element name.
    pub name: String,
    /// Last text seen inside the element.
    pub text: Option<String>,
    /// Element attributes, sorted by name.
    pub attributes: BTreeMap<String, String>,
}

impl Match {
    fn from_tag(tag: &Tag<'_, ()>) -> Self {
        let mut names: Vec<&str> = tag.ancestors().map(TagContext::name).collect();
        names.reverse();
        names.push(tag.name());
        let separator = PATH_SEPARATOR.to_string();

        Self {
            path: names.join(separator.as_str()),
            name: tag.name().to_string(),
            text: tag.text().map(String::from),
            attributes: tag
                .attributes()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Collects the elements matching a set of path patterns.
///
/// # Example
/// ```
/// use saxo::extract::Extractor;
///
/// let extractor = Extractor::new(["book/title"]).unwrap();
/// let matches = extractor
///     .extract_str("<catalog><book><title>Dune</title></book></catalog>")
///     .unwrap();
/// assert_eq!(matches[0].path, "book/title");
/// assert_eq!(matches[0].text.as_deref(), Some("Dune"));
/// ```
#[derive(Debug)]
pub struct Extractor {
    saxo: Saxo,
    receiver: Receiver<Match>,
}

impl Extractor {
    /// Compile patterns with default text options.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for the first pattern that does not validate.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(patterns, ParseOptions::default())
    }

    /// Compile patterns with explicit text options.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for the first pattern that does not validate.
    pub fn with_options<I, S>(patterns: I, options: ParseOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (sender, receiver) = mpsc::channel();
        let mut root = HandlerNode::new();

        for pattern in patterns {
            let segments = validate_pattern(pattern.as_ref())?;
            insert_pattern(&mut root, &segments, &sender);
        }

        Ok(Self {
            saxo: Saxo::with_options(root, options),
            receiver,
        })
    }

    /// Extract matches from an in-memory document.
    ///
    /// # Errors
    /// Returns the parse error; matches found before it are discarded.
    pub fn extract_str(&self, xml: &str) -> Result<Vec<Match>> {
        let result = self.saxo.parse_str(xml);
        self.collect(result)
    }

    /// Extract matches from the file at `path`.
    ///
    /// # Errors
    /// Returns the IO or parse error; matches found before it are discarded.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<Vec<Match>> {
        let result = self.saxo.parse_path(path);
        self.collect(result)
    }

    fn collect(&self, result: Result<()>) -> Result<Vec<Match>> {
        // Drain even on failure so a later run starts empty.
        let matches: Vec<Match> = self.receiver.try_iter().collect();
        result.map(|()| matches)
    }
}

/// Add one pattern to the tree, creating composites along the way.
fn insert_pattern(root: &mut HandlerNode, segments: &[&str], sender: &Sender<Match>) {
    let mut node = root;
    for segment in segments {
        let Some(composite) = node.as_composite_mut() else {
            return;
        };
        node = if *segment == WILDCARD_SEGMENT {
            composite.wildcard_entry()
        } else {
            composite.child_entry(*segment)
        };
    }

    if let Some(composite) = node.as_composite_mut() {
        let sender = sender.clone();
        composite.set_on_close(move |tag| {
            // The receiver lives as long as the extractor owning this tree.
            let _ = sender.send(Match::from_tag(tag));
        });
    }
}
