//! Declarative handler tree and the dispatch core that drives it.
//!
//! Callers describe which elements they care about as a tree of
//! [`HandlerNode`]s keyed by element name. The [`DispatchCore`] consumes
//! open/close/text events, keeps a stack of matched handlers in step with the
//! element stack, and runs the lifecycle callbacks with a [`Tag`] view.

mod core;
mod engine;
mod handler;
mod types;

pub use self::core::CompositeNode;
pub use engine::DispatchCore;
pub use handler::{Callback, HandlerNode};
pub use types::{Attributes, Tag, TagContext};
