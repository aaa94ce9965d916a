//! Saxo - Declarative tag-tree event dispatch on top of a streaming XML tokenizer.
//!
//! Describe the elements you care about as a nested tree of handlers keyed by
//! element name; saxo feeds the tokenizer's open/close/text events through the
//! tree, keeps a stack of matched handlers in step with the document, and runs
//! your callbacks with the element's name, attributes, text, parent and a
//! free-form data slot.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use saxo::{HandlerNode, Saxo};
//!
//! #[derive(Default)]
//! struct Props {
//!     some_prop: String,
//!     more_props: Vec<String>,
//! }
//!
//! let out = Arc::new(Mutex::new(String::new()));
//! let sink = out.clone();
//! let handlers: HandlerNode<Props> = HandlerNode::new().child(
//!     "myTag",
//!     HandlerNode::new()
//!         .on_open(|tag| {
//!             let some_prop = tag.attribute("someProp").unwrap_or_default().to_string();
//!             tag.set_data(Props { some_prop, ..Props::default() });
//!         })
//!         .on_close(move |tag| {
//!             if let Some(props) = tag.data() {
//!                 *sink.lock().unwrap() = format!("{} {:?}", props.some_prop, props.more_props);
//!             }
//!         })
//!         .leaf_child("mySubTag", |tag| {
//!             let text = tag.text().unwrap_or_default().to_string();
//!             if let Some(mut parent) = tag.parent_mut() {
//!                 if let Some(props) = parent.data_mut() {
//!                     props.more_props.push(text);
//!                 }
//!             }
//!         }),
//! );
//!
//! let saxo = Saxo::new(handlers);
//! saxo.parse_str(r#"<root><myTag someProp="someValue"><mySubTag>Some</mySubTag><mySubTag>Text</mySubTag></myTag></root>"#)
//!     .unwrap();
//! assert_eq!(*out.lock().unwrap(), r#"someValue ["Some", "Text"]"#);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, text options and pattern validation
//! - [`error`]: Error types and Result alias
//! - [`registry`]: Handler tree, tag contexts and the dispatch core
//! - [`xml`]: Tokenizer adapters (quick-xml stream, roxmltree replay)
//! - [`parser`]: String, stream, file and async entry points
//! - [`extract`]: Path-pattern extraction
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod parser;
pub mod registry;
pub mod xml;

// Re-export commonly used items
pub use config::ParseOptions;
pub use error::{Result, SaxoError};
pub use parser::Saxo;
pub use registry::{CompositeNode, DispatchCore, HandlerNode, Tag, TagContext};
