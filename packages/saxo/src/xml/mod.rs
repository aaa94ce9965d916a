//! Adapters between XML tokenizers and the dispatch core.
//!
//! - [`reader`]: quick-xml events to dispatch calls, with open-element tracking
//! - [`dom`]: replay of a parsed roxmltree document
//! - [`text`]: trimming and whitespace normalization of text events

pub mod dom;
pub mod reader;
pub mod text;

pub use reader::EventSink;
pub use text::prepare_text;
