//! Dispatch core that routes tokenizer events through the handler tree.

use super::handler::{Callback, HandlerNode};
use super::types::{Attributes, Tag, TagContext};

/// A matched element sitting on the dispatch stack.
struct Frame<'h, D> {
    node: &'h HandlerNode<D>,
    /// Unmatched elements currently open inside this frame's element.
    transparent: usize,
}

/// Routes open/close/text events to the handler tree.
///
/// The core keeps one frame per open element that matched a handler, plus a
/// parallel stack of [`TagContext`]s. The handler tree itself is only ever
/// borrowed, so one tree can drive any number of dispatch runs.
///
/// Elements without a handler are transparent: no frame is pushed, their
/// close is ignored, and their descendants keep resolving against the
/// innermost matched handler.
pub struct DispatchCore<'h, D = ()> {
    root: &'h HandlerNode<D>,
    frames: Vec<Frame<'h, D>>,
    contexts: Vec<TagContext<D>>,
}

impl<'h, D> DispatchCore<'h, D> {
    /// Create a core whose stack holds only the root handler.
    #[must_use]
    pub fn new(root: &'h HandlerNode<D>) -> Self {
        Self {
            root,
            frames: Vec::new(),
            contexts: Vec::new(),
        }
    }

    /// Number of matched elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Context of the innermost matched element.
    #[must_use]
    pub fn current_tag(&self) -> Option<&TagContext<D>> {
        self.contexts.last()
    }

    /// Handle an open tag.
    ///
    /// Resolves the element against the innermost matched handler (exact name,
    /// then wildcard). On a match a new context is pushed and the open
    /// callback, if any, runs.
    pub fn open(&mut self, name: &str, attributes: Attributes) {
        let current = self.frames.last().map_or(self.root, |frame| frame.node);

        let Some(matched) = current.resolve(name) else {
            tracing::trace!(tag = %name, depth = self.frames.len(), "No handler, element is transparent");
            if let Some(frame) = self.frames.last_mut() {
                frame.transparent += 1;
            }
            return;
        };

        self.frames.push(Frame {
            node: matched,
            transparent: 0,
        });
        self.contexts.push(TagContext::new(name, attributes));

        if let Some(callback) = matched.open_callback() {
            self.invoke(callback);
        }
    }

    /// Handle a close tag.
    ///
    /// Closes of transparent elements, and closes that do not name the
    /// innermost matched element, leave the stack untouched.
    pub fn close(&mut self, name: &str) {
        let Some(frame) = self.frames.last_mut() else {
            tracing::trace!(tag = %name, "Close outside any matched element");
            return;
        };

        if frame.transparent > 0 {
            frame.transparent -= 1;
            return;
        }

        let node = frame.node;
        let names_match = self
            .contexts
            .last()
            .is_some_and(|context| context.name() == name);
        if !names_match {
            tracing::trace!(tag = %name, "Close does not match the innermost handled element");
            return;
        }

        if let Some(callback) = node.close_callback() {
            self.invoke(callback);
        }

        self.frames.pop();
        self.contexts.pop();
    }

    /// Handle character data.
    ///
    /// Overwrites the innermost matched element's text, then runs its text
    /// callback. Text outside any matched element is dropped.
    pub fn text(&mut self, content: impl Into<String>) {
        let Some(context) = self.contexts.last_mut() else {
            tracing::trace!("Text outside any matched element");
            return;
        };
        context.set_text(content);

        let node = self.frames.last().map_or(self.root, |frame| frame.node);
        if let Some(callback) = node.text_callback() {
            self.invoke(callback);
        }
    }

    /// Handle a CDATA section; routed exactly like text.
    pub fn cdata(&mut self, content: impl Into<String>) {
        self.text(content);
    }

    fn invoke(&mut self, callback: &Callback<D>) {
        if let Some((context, ancestors)) = self.contexts.split_last_mut() {
            callback(&mut Tag::new(context, ancestors));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_open_and_close_are_balanced() {
        let opens = counter();
        let closes = counter();
        let (o, c) = (opens.clone(), closes.clone());
        let root: HandlerNode = HandlerNode::new().child(
            "a",
            HandlerNode::new()
                .on_open(move |_| {
                    o.fetch_add(1, Ordering::SeqCst);
                })
                .on_close(move |_| {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
        );

        let mut core = DispatchCore::new(&root);
        core.open("root", Attributes::new());
        for _ in 0..3 {
            core.open("a", Attributes::new());
            assert_eq!(core.depth(), 1);
            core.close("a");
        }
        core.close("root");

        assert_eq!(core.depth(), 0);
        assert_eq!(opens.load(Ordering::SeqCst), 3);
        assert_eq!(closes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unmatched_close_does_not_underflow() {
        let root: HandlerNode = HandlerNode::new();
        let mut core = DispatchCore::new(&root);

        core.close("nothing");
        core.text("ignored");

        assert_eq!(core.depth(), 0);
        assert!(core.current_tag().is_none());
    }

    #[test]
    fn test_nested_unmatched_element_with_same_name() {
        let closes = counter();
        let c = closes.clone();
        let root: HandlerNode = HandlerNode::new().leaf_child("a", move |tag| {
            assert_eq!(tag.text(), Some("inner"));
            c.fetch_add(1, Ordering::SeqCst);
        });

        let mut core = DispatchCore::new(&root);
        core.open("a", Attributes::new());
        core.open("a", Attributes::new());
        core.text("inner");
        core.close("a");
        assert_eq!(closes.load(Ordering::SeqCst), 0);
        assert_eq!(core.depth(), 1);
        core.close("a");

        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(core.depth(), 0);
    }

    #[test]
    fn test_text_overwrites_and_fires_text_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let root: HandlerNode = HandlerNode::new().child(
            "p",
            HandlerNode::new().on_text(move |tag| {
                s.lock().unwrap().push(tag.text().unwrap_or_default().to_string());
            }),
        );

        let mut core = DispatchCore::new(&root);
        core.open("p", Attributes::new());
        core.text("first");
        core.cdata("<second>");
        assert_eq!(core.current_tag().unwrap().text(), Some("<second>"));
        core.close("p");

        assert_eq!(*seen.lock().unwrap(), vec!["first", "<second>"]);
    }

    #[test]
    fn test_parent_context_and_data() {
        let root: HandlerNode<Vec<String>> = HandlerNode::new().child(
            "list",
            HandlerNode::new()
                .on_open(|tag| {
                    let prefix = tag.attribute("prefix").unwrap_or_default().to_string();
                    tag.set_data(vec![prefix]);
                })
                .on_close(|tag| {
                    assert_eq!(tag.data().unwrap(), &vec!["#", "x", "y"]);
                })
                .leaf_child("item", |tag| {
                    let text = tag.text().unwrap_or_default().to_string();
                    let mut parent = tag.parent_mut().unwrap();
                    parent.data_mut().unwrap().push(text);
                }),
        );

        let mut core = DispatchCore::new(&root);
        core.open("list", attrs(&[("prefix", "#")]));
        for text in ["x", "y"] {
            core.open("item", Attributes::new());
            core.text(text);
            core.close("item");
        }
        assert_eq!(core.current_tag().unwrap().data().unwrap().len(), 3);
        core.close("list");
    }

    #[test]
    fn test_wildcard_one_level_only() {
        let opens = Arc::new(Mutex::new(Vec::new()));
        let o = opens.clone();
        let root: HandlerNode = HandlerNode::new().child(
            "root",
            HandlerNode::new().wildcard(HandlerNode::new().on_open(move |tag| {
                o.lock().unwrap().push(tag.name().to_string());
            })),
        );

        let mut core = DispatchCore::new(&root);
        core.open("root", Attributes::new());
        core.open("x", Attributes::new());
        core.open("nested", Attributes::new());
        core.close("nested");
        core.close("x");
        core.open("y", Attributes::new());
        core.close("y");
        core.close("root");

        assert_eq!(*opens.lock().unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_top_level_tag_has_no_parent() {
        let root: HandlerNode = HandlerNode::new().child(
            "a",
            HandlerNode::new().on_open(|tag| {
                assert!(tag.parent().is_none());
                assert_eq!(tag.depth(), 0);
            }),
        );

        let mut core = DispatchCore::new(&root);
        core.open("a", Attributes::new());
        core.close("a");
    }
}
