//! Replay of an already parsed roxmltree document through the dispatch core.

use roxmltree::Node;

use super::text::prepare_text;
use crate::config::ParseOptions;
use crate::registry::{Attributes, DispatchCore};

/// Get the element name with its namespace prefix, as written in the source.
///
/// roxmltree resolves prefixes away; this restores them so the names match
/// what the streaming tokenizer reports.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use saxo::xml::dom::qualified_name;
///
/// let xml = r#"<ns:root xmlns:ns="http://example.com"><child/></ns:root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(qualified_name(doc.root_element()), "ns:root");
/// ```
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    prefixed(node, tag.namespace(), tag.name())
}

/// Collect element attributes, keyed by their prefixed names.
///
/// Namespace declarations are not attributes in roxmltree and are not included.
pub fn collect_attributes(node: Node<'_, '_>) -> Attributes {
    node.attributes()
        .map(|attr| (prefixed(node, attr.namespace(), attr.name()), attr.value().to_string()))
        .collect()
}

fn prefixed(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|ns| node.lookup_prefix(ns)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Walk the children of `node` depth-first, dispatching open/text/close.
///
/// Text nodes go through the same [`prepare_text`] cleanup as streamed text.
/// roxmltree merges CDATA into text nodes, so CDATA arrives as text.
pub fn replay<D>(core: &mut DispatchCore<'_, D>, node: Node<'_, '_>, options: &ParseOptions) {
    for child in node.children() {
        if child.is_element() {
            let name = qualified_name(child);
            core.open(&name, collect_attributes(child));
            replay(core, child, options);
            core.close(&name);
        } else if child.is_text() {
            if let Some(text) = child.text().and_then(|t| prepare_text(t, options)) {
                core.text(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HandlerNode;
    use roxmltree::Document;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_qualified_name_without_namespace() {
        let doc = Document::parse("<root/>").unwrap();
        assert_eq!(qualified_name(doc.root_element()), "root");
    }

    #[test]
    fn test_collect_attributes() {
        let xml = r#"<root xmlns:x="urn:x" a="1" x:b="2"/>"#;
        let doc = Document::parse(xml).unwrap();
        let attributes = collect_attributes(doc.root_element());

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get("a").map(String::as_str), Some("1"));
        assert_eq!(attributes.get("x:b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_replay_dispatches_in_document_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (open, close) = (log.clone(), log.clone());
        let tree: HandlerNode = HandlerNode::new().child(
            "list",
            HandlerNode::new()
                .on_open(move |tag| open.lock().unwrap().push(format!("open {}", tag.name())))
                .leaf_child("item", move |tag| {
                    close
                        .lock()
                        .unwrap()
                        .push(format!("item {}", tag.text().unwrap_or_default()))
                }),
        );

        let doc = Document::parse("<doc><list>\n <item> a  b </item><skip/><item>c</item></list></doc>")
            .unwrap();
        let mut core = DispatchCore::new(&tree);
        replay(&mut core, doc.root(), &ParseOptions::default());

        assert_eq!(core.depth(), 0);
        assert_eq!(*log.lock().unwrap(), vec!["open list", "item a b", "item c"]);
    }
}
