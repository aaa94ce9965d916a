//! Handler tree node definition.

use std::fmt;

use super::core::CompositeNode;
use super::types::Tag;

/// Lifecycle callback invoked with the matched element's [`Tag`].
pub type Callback<D> = Box<dyn Fn(&mut Tag<'_, D>) + Send + Sync>;

/// A node of the declarative handler tree.
///
/// A node is either a plain callback, run when the matching element closes,
/// or a composite carrying lifecycle callbacks and handlers for child elements.
///
/// # Example
/// ```
/// use saxo::HandlerNode;
///
/// let handlers: HandlerNode = HandlerNode::new().child(
///     "book",
///     HandlerNode::new()
///         .on_open(|tag| println!("book {:?}", tag.attribute("id")))
///         .leaf_child("title", |tag| println!("title {:?}", tag.text())),
/// );
/// assert!(handlers.resolve("book").is_some());
/// ```
pub enum HandlerNode<D = ()> {
    /// Callback fired on close; the element's children are not handled.
    Leaf(Callback<D>),
    /// Lifecycle callbacks plus child handlers.
    Composite(CompositeNode<D>),
}

impl<D> HandlerNode<D> {
    /// Create an empty composite node.
    #[must_use]
    pub fn new() -> Self {
        Self::Composite(CompositeNode::new())
    }

    /// Create a leaf node from a close callback.
    #[must_use]
    pub fn leaf<F>(callback: F) -> Self
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        Self::Leaf(Box::new(callback))
    }

    /// Set the callback run when the element opens.
    #[must_use]
    pub fn on_open<F>(self, callback: F) -> Self
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        let mut composite = self.into_composite();
        composite.set_on_open(callback);
        Self::Composite(composite)
    }

    /// Set the callback run when the element closes.
    #[must_use]
    pub fn on_close<F>(self, callback: F) -> Self
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        let mut composite = self.into_composite();
        composite.set_on_close(callback);
        Self::Composite(composite)
    }

    /// Set the callback run for every text or CDATA event of the element.
    #[must_use]
    pub fn on_text<F>(self, callback: F) -> Self
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        let mut composite = self.into_composite();
        composite.set_on_text(callback);
        Self::Composite(composite)
    }

    /// Register a handler for a child element name.
    #[must_use]
    pub fn child(self, name: impl Into<String>, node: HandlerNode<D>) -> Self {
        let mut composite = self.into_composite();
        composite.register(name, node);
        Self::Composite(composite)
    }

    /// Register a close callback for a child element name.
    #[must_use]
    pub fn leaf_child<F>(self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut Tag<'_, D>) + Send + Sync + 'static,
    {
        self.child(name, HandlerNode::leaf(callback))
    }

    /// Register the handler for child elements without an exact entry.
    #[must_use]
    pub fn wildcard(self, node: HandlerNode<D>) -> Self {
        let mut composite = self.into_composite();
        composite.set_wildcard(node);
        Self::Composite(composite)
    }

    /// Resolve the handler for a child element.
    ///
    /// An exact name match wins over the wildcard. Leaves have no children.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&HandlerNode<D>> {
        match self {
            Self::Leaf(_) => None,
            Self::Composite(composite) => composite.resolve(name),
        }
    }

    /// Borrow the composite form, if this is not a leaf.
    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeNode<D>> {
        match self {
            Self::Leaf(_) => None,
            Self::Composite(composite) => Some(composite),
        }
    }

    /// Mutably borrow the composite form, if this is not a leaf.
    pub fn as_composite_mut(&mut self) -> Option<&mut CompositeNode<D>> {
        match self {
            Self::Leaf(_) => None,
            Self::Composite(composite) => Some(composite),
        }
    }

    /// Check whether this node is a leaf callback.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Callback to run for the element's close event.
    pub(crate) fn close_callback(&self) -> Option<&Callback<D>> {
        match self {
            Self::Leaf(callback) => Some(callback),
            Self::Composite(composite) => composite.on_close.as_ref(),
        }
    }

    pub(crate) fn open_callback(&self) -> Option<&Callback<D>> {
        self.as_composite().and_then(|c| c.on_open.as_ref())
    }

    pub(crate) fn text_callback(&self) -> Option<&Callback<D>> {
        self.as_composite().and_then(|c| c.on_text.as_ref())
    }

    /// A leaf turns into a composite whose close callback is the leaf.
    fn into_composite(self) -> CompositeNode<D> {
        match self {
            Self::Leaf(callback) => {
                let mut composite = CompositeNode::new();
                composite.on_close = Some(callback);
                composite
            }
            Self::Composite(composite) => composite,
        }
    }
}

impl<D> Default for HandlerNode<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> From<CompositeNode<D>> for HandlerNode<D> {
    fn from(composite: CompositeNode<D>) -> Self {
        Self::Composite(composite)
    }
}

impl<D> fmt::Debug for HandlerNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(_) => f.write_str("Leaf(..)"),
            Self::Composite(composite) => fmt::Debug::fmt(composite, f),
        }
    }
}
