//! Tag context types handed to lifecycle callbacks.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Attribute mapping reported by the tokenizer (name to unescaped value).
pub type Attributes = HashMap<String, String>;

/// Per-element record created when an open tag matches a handler.
///
/// Lives on the dispatch stack for as long as its element is open and is
/// dropped once the close callback has run.
pub struct TagContext<D = ()> {
    name: String,
    attributes: Attributes,
    text: Option<String>,
    data: Option<D>,
}

impl<D> TagContext<D> {
    /// Create a context for an element that has just been opened.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            text: None,
            data: None,
        }
    }

    /// Element name as reported by the tokenizer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes of the element.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Value of a single attribute, passed through unmodified.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Text of the last text or CDATA event seen inside the element.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the element text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Caller data attached to this element, if any.
    #[must_use]
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Mutable access to the caller data.
    pub fn data_mut(&mut self) -> Option<&mut D> {
        self.data.as_mut()
    }

    /// Attach caller data, replacing whatever was there.
    pub fn set_data(&mut self, data: D) {
        self.data = Some(data);
    }

    /// Remove and return the caller data.
    pub fn take_data(&mut self) -> Option<D> {
        self.data.take()
    }
}

impl<D> fmt::Debug for TagContext<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagContext")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("text", &self.text)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Callback view of the innermost matched element and its matched ancestors.
///
/// Dereferences to the element's own [`TagContext`]; the parent chain is
/// reachable through [`Tag::parent`] and [`Tag::parent_mut`].
pub struct Tag<'a, D = ()> {
    context: &'a mut TagContext<D>,
    ancestors: &'a mut [TagContext<D>],
}

impl<'a, D> Tag<'a, D> {
    pub(crate) fn new(context: &'a mut TagContext<D>, ancestors: &'a mut [TagContext<D>]) -> Self {
        Self { context, ancestors }
    }

    /// Context of the nearest enclosing matched element.
    ///
    /// `None` at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<&TagContext<D>> {
        self.ancestors.last()
    }

    /// Mutable view of the parent, with its own parent chain.
    pub fn parent_mut(&mut self) -> Option<Tag<'_, D>> {
        let (parent, rest) = self.ancestors.split_last_mut()?;
        Some(Tag::new(parent, rest))
    }

    /// Matched ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TagContext<D>> {
        self.ancestors.iter().rev()
    }

    /// Number of matched ancestors.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

impl<D> Deref for Tag<'_, D> {
    type Target = TagContext<D>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl<D> DerefMut for Tag<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl<D> fmt::Debug for Tag<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("context", &self.context)
            .field("depth", &self.ancestors.len())
            .finish()
    }
}
