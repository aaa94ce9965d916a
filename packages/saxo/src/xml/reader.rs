//! quick-xml adapter: turns tokenizer events into dispatch calls.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tokio::io::AsyncBufRead;

use super::text::prepare_text;
use crate::config::{ParseOptions, DEFAULT_BUFFER_CAPACITY};
use crate::error::{Result, SaxoError};
use crate::registry::{Attributes, DispatchCore, HandlerNode};

/// Feeds quick-xml events into a [`DispatchCore`] for one document.
///
/// Besides the matched-handler stack kept by the core, the sink tracks every
/// open element so that a document ending early is reported as an error.
pub struct EventSink<'h, D = ()> {
    core: DispatchCore<'h, D>,
    options: ParseOptions,
    open_elements: Vec<String>,
}

impl<'h, D> EventSink<'h, D> {
    /// Create a sink dispatching to the given handler tree.
    #[must_use]
    pub fn new(root: &'h HandlerNode<D>, options: ParseOptions) -> Self {
        Self {
            core: DispatchCore::new(root),
            options,
            open_elements: Vec::new(),
        }
    }

    /// Handle a single tokenizer event.
    ///
    /// # Returns
    /// `Ok(true)` while more events are expected, `Ok(false)` at end of document
    ///
    /// # Errors
    /// Returns an error for undecodable names, text or attributes,
    /// `TextOutsideRoot` for character data outside every element, and
    /// `UnclosedTag` when the document ends with open elements.
    pub fn handle(&mut self, event: Event<'_>) -> Result<bool> {
        match event {
            Event::Start(start) => {
                let (name, attributes) = decode_start(&start)?;
                self.core.open(&name, attributes);
                self.open_elements.push(name);
            }
            Event::Empty(start) => {
                let (name, attributes) = decode_start(&start)?;
                self.core.open(&name, attributes);
                self.core.close(&name);
            }
            Event::End(end) => {
                let qname = end.name();
                let name = std::str::from_utf8(qname.as_ref())?;
                self.open_elements.pop();
                self.core.close(name);
            }
            Event::Text(text) => {
                let raw = text.unescape()?;
                if self.open_elements.is_empty() && !raw.trim().is_empty() {
                    return Err(SaxoError::TextOutsideRoot);
                }
                if let Some(text) = prepare_text(&raw, &self.options) {
                    self.core.text(text);
                }
            }
            Event::CData(cdata) => {
                if self.open_elements.is_empty() {
                    return Err(SaxoError::TextOutsideRoot);
                }
                let content = std::str::from_utf8(&cdata)?;
                self.core.cdata(content);
            }
            Event::Eof => {
                if let Some(name) = self.open_elements.pop() {
                    return Err(SaxoError::UnclosedTag { name });
                }
                return Ok(false);
            }
            _ => {}
        }
        Ok(true)
    }

    /// Dispatch an in-memory document.
    pub fn run_str(&mut self, xml: &str) -> Result<()> {
        let mut reader = Reader::from_str(xml);
        configure(&mut reader);

        loop {
            let event = reader.read_event().map_err(tokenizer_error)?;
            if !self.handle(event)? {
                return Ok(());
            }
        }
    }

    /// Dispatch a document read incrementally from a buffered source.
    pub fn run_buffered<R: BufRead>(&mut self, source: R) -> Result<()> {
        let mut reader = Reader::from_reader(source);
        configure(&mut reader);
        let mut buf = Vec::with_capacity(DEFAULT_BUFFER_CAPACITY);

        loop {
            let event = reader.read_event_into(&mut buf).map_err(tokenizer_error)?;
            if !self.handle(event)? {
                return Ok(());
            }
            buf.clear();
        }
    }

    /// Dispatch a document read incrementally from an async source.
    pub async fn run_async<R: AsyncBufRead + Unpin>(&mut self, source: R) -> Result<()> {
        let mut reader = Reader::from_reader(source);
        configure(&mut reader);
        let mut buf = Vec::with_capacity(DEFAULT_BUFFER_CAPACITY);

        loop {
            let event = reader
                .read_event_into_async(&mut buf)
                .await
                .map_err(tokenizer_error)?;
            if !self.handle(event)? {
                return Ok(());
            }
            buf.clear();
        }
    }
}

/// Tokenizer settings: strict end-tag checking, raw text.
///
/// Text cleanup is done by [`prepare_text`], not by the tokenizer.
fn configure<R>(reader: &mut Reader<R>) {
    let config = reader.config_mut();
    config.check_end_names = true;
    config.trim_text(false);
}

/// Map tokenizer errors, surfacing read failures as IO errors.
fn tokenizer_error(err: quick_xml::Error) -> SaxoError {
    match err {
        quick_xml::Error::Io(io) => SaxoError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => SaxoError::Xml(other),
    }
}

/// Decode an element name and its attributes.
fn decode_start(start: &BytesStart<'_>) -> Result<(String, Attributes)> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes = Attributes::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }

    Ok((name, attributes))
}
