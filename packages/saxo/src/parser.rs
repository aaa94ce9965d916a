//! Entry points that tie a handler tree to an input source.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tokio::io::AsyncBufRead;

use crate::config::ParseOptions;
use crate::error::{Result, SaxoError};
use crate::registry::{DispatchCore, HandlerNode};
use crate::xml::{dom, EventSink};

/// Declarative XML parser driven by a handler tree.
///
/// The tree is borrowed for every run and never mutated, so one `Saxo` can
/// parse any number of documents.
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use saxo::{HandlerNode, Saxo};
///
/// let count = Arc::new(AtomicUsize::new(0));
/// let seen = count.clone();
/// let saxo: Saxo = Saxo::new(HandlerNode::new().child(
///     "anyName",
///     HandlerNode::new().on_open(move |_| {
///         seen.fetch_add(1, Ordering::SeqCst);
///     }),
/// ));
///
/// saxo.parse_str("<root><anyName/><anyName/><other/></root>").unwrap();
/// assert_eq!(count.load(Ordering::SeqCst), 2);
/// ```
#[derive(Debug)]
pub struct Saxo<D = ()> {
    handlers: HandlerNode<D>,
    options: ParseOptions,
}

impl<D> Saxo<D> {
    /// Create a parser with default text options (trim + normalize).
    #[must_use]
    pub fn new(handlers: HandlerNode<D>) -> Self {
        Self::with_options(handlers, ParseOptions::default())
    }

    /// Create a parser with explicit text options.
    #[must_use]
    pub fn with_options(handlers: HandlerNode<D>, options: ParseOptions) -> Self {
        Self { handlers, options }
    }

    /// Parse an in-memory document.
    ///
    /// # Errors
    /// Returns the first tokenizer error; nothing after it is dispatched.
    pub fn parse_str(&self, xml: &str) -> Result<()> {
        tracing::debug!(bytes = xml.len(), "Parsing XML string");
        let result = self.sink().run_str(xml);
        log_outcome(&result);
        result
    }

    /// Parse an in-memory document, handing any error to `on_error`.
    ///
    /// `on_error` runs at most once and is not called on success.
    pub fn parse_string<F>(&self, xml: &str, on_error: F)
    where
        F: FnOnce(SaxoError),
    {
        if let Err(err) = self.parse_str(xml) {
            on_error(err);
        }
    }

    /// Parse a document read incrementally from a buffered source.
    ///
    /// # Errors
    /// Returns the first tokenizer or read error.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<()> {
        tracing::debug!("Parsing XML stream");
        let result = self.sink().run_buffered(source);
        log_outcome(&result);
        result
    }

    /// Parse a buffered source and report completion through `on_complete`.
    ///
    /// `on_complete` runs exactly once: with the first fatal error, or with
    /// `Ok(())` at the end of the stream.
    pub fn parse_stream<R, F>(&self, source: R, on_complete: F)
    where
        R: BufRead,
        F: FnOnce(Result<()>),
    {
        on_complete(self.parse_reader(source));
    }

    /// Parse the file at `path`.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be opened, otherwise as
    /// [`Saxo::parse_reader`].
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening XML file");
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse the file at `path` and report completion through `on_complete`.
    ///
    /// Open failures arrive through the same callback as parse errors.
    pub fn parse_file<F>(&self, path: impl AsRef<Path>, on_complete: F)
    where
        F: FnOnce(Result<()>),
    {
        on_complete(self.parse_path(path));
    }

    /// Parse a document read from an async source.
    ///
    /// Callbacks still run synchronously between reads.
    ///
    /// # Errors
    /// Returns the first tokenizer or read error.
    pub async fn parse_async<R: AsyncBufRead + Unpin>(&self, source: R) -> Result<()> {
        tracing::debug!("Parsing async XML stream");
        let result = self.sink().run_async(source).await;
        log_outcome(&result);
        result
    }

    /// Parse the file at `path` with tokio file IO.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be opened, otherwise as
    /// [`Saxo::parse_async`].
    pub async fn parse_file_async(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening XML file (async)");
        let file = tokio::fs::File::open(path).await?;
        self.parse_async(tokio::io::BufReader::new(file)).await
    }

    /// Dispatch a document that has already been parsed by roxmltree.
    ///
    /// Uses the same handler resolution and text options as the streaming
    /// entry points. The DOM is well-formed by construction, so this cannot fail.
    pub fn dispatch_document(&self, document: &roxmltree::Document<'_>) {
        tracing::debug!("Replaying parsed document");
        let mut core = DispatchCore::new(&self.handlers);
        dom::replay(&mut core, document.root(), &self.options);
    }

    fn sink(&self) -> EventSink<'_, D> {
        EventSink::new(&self.handlers, self.options)
    }
}

fn log_outcome(result: &Result<()>) {
    match result {
        Ok(()) => tracing::debug!("Parse finished"),
        Err(err) => tracing::warn!(error = %err, "Parse failed"),
    }
}
