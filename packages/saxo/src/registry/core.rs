//! Composite handler node: lifecycle callbacks plus a registry of child handlers.

use std::collections::HashMap;
use std::fmt;

use super::handler::{Callback, HandlerNode};
use super::types::Tag;

/// Handler for an element with lifecycle callbacks and child handlers.
///
/// Child handlers are keyed by exact element name. The wildcard handler lives
/// in its own slot, so an element literally named `*` is just another name.
pub struct CompositeNode<D = ()> {
    pub(crate) on_open: Option<Callback<D>>,
    pub(crate) on_close: Option<Callback<D>>,
    pub(crate) on_text: Option<Callback<D>>,
    children: HashMap<String, HandlerNode<D>>,
    wildcard: Option<Box<HandlerNode<D>>>,
}

impl<D> CompositeNode<D> {
    /// Create a composite without callbacks or children.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_open: None,
            on_close: None,
            on_text: None,
            children: HashMap::new(),
            wildcard: None,
        }
    }

    /// Set the open callback.
    pub fn set_on_open<F>(&mut self, callback: F)
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        self.on_open = Some(Box::new(callback));
    }

    /// Set the close callback.
    pub fn set_on_close<F>(&mut self, callback: F)
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        self.on_close = Some(Box::new(callback));
    }

    /// Set the text callback.
    pub fn set_on_text<F>(&mut self, callback: F)
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        self.on_text = Some(Box::new(callback));
    }

    /// Register a handler for a child element name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, node: HandlerNode<D>) {
        self.children.insert(name.into(), node);
    }

    /// Set the handler used for child elements without an exact entry.
    pub fn set_wildcard(&mut self, node: HandlerNode<D>) {
        self.wildcard = Some(Box::new(node));
    }

    /// Handler for `name`, inserting an empty composite if none is registered.
    pub fn child_entry(&mut self, name: impl Into<String>) -> &mut HandlerNode<D> {
        self.children.entry(name.into()).or_default()
    }

    /// Wildcard handler, inserting an empty composite if none is set.
    pub fn wildcard_entry(&mut self) -> &mut HandlerNode<D> {
        self.wildcard.get_or_insert_with(Box::default)
    }

    /// Resolve the handler for a child element: exact name first, then wildcard.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&HandlerNode<D>> {
        self.children.get(name).or(self.wildcard.as_deref())
    }
}

impl<D> Default for CompositeNode<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for CompositeNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeNode")
            .field("has_open", &self.on_open.is_some())
            .field("has_close", &self.on_close.is_some())
            .field("has_text", &self.on_text.is_some())
            .field("children", &self.children)
            .field("wildcard", &self.wildcard)
            .finish()
    }
}
