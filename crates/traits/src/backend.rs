use crate::sink::OutputResource;
use folio_types::{LayoutResult, PageFormat, PageRange};
use std::fmt;

/// How a layout request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutCompletion {
    Finished(LayoutResult),
    Failed(String),
}

/// How a write request ended. Cancellation is a distinct signal from failure
/// and carries no diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCompletion {
    /// The pages that were actually written.
    Finished(Vec<PageRange>),
    Failed(String),
    Cancelled,
}

/// A one-shot continuation for the layout stage.
///
/// Completing consumes the callback, so a backend can signal at most once.
/// Dropping it without completing leaves the job suspended.
pub struct LayoutCallback {
    inner: Box<dyn FnOnce(LayoutCompletion) + Send>,
}

impl LayoutCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(LayoutCompletion) + Send + 'static,
    {
        Self { inner: Box::new(f) }
    }

    pub fn complete(self, completion: LayoutCompletion) {
        (self.inner)(completion)
    }

    pub fn finished(self, result: LayoutResult) {
        self.complete(LayoutCompletion::Finished(result))
    }

    pub fn failed(self, diagnostic: impl Into<String>) {
        self.complete(LayoutCompletion::Failed(diagnostic.into()))
    }
}

impl fmt::Debug for LayoutCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCallback").finish_non_exhaustive()
    }
}

/// A one-shot continuation for the write stage.
pub struct WriteCallback {
    inner: Box<dyn FnOnce(WriteCompletion) + Send>,
}

impl WriteCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(WriteCompletion) + Send + 'static,
    {
        Self { inner: Box::new(f) }
    }

    pub fn complete(self, completion: WriteCompletion) {
        (self.inner)(completion)
    }

    pub fn finished(self, pages: Vec<PageRange>) {
        self.complete(WriteCompletion::Finished(pages))
    }

    pub fn failed(self, diagnostic: impl Into<String>) {
        self.complete(WriteCompletion::Failed(diagnostic.into()))
    }

    pub fn cancelled(self) {
        self.complete(WriteCompletion::Cancelled)
    }
}

impl fmt::Debug for WriteCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCallback").finish_non_exhaustive()
    }
}

/// The two-phase rendering protocol.
///
/// Both operations return immediately. Completion is signalled later through
/// the callback, from whatever thread the backend chooses; callers must not
/// assume it runs on the thread that submitted the request. A backend may also
/// complete inline, before the submitting call returns.
pub trait RenderingBackend: Send + Sync {
    /// Computes pagination for `format`.
    fn layout(&self, format: &PageFormat, callback: LayoutCallback);

    /// Serialises the selected pages into `sink`. The backend owns `sink`
    /// until it completes the callback.
    fn write(&self, pages: &[PageRange], sink: OutputResource, callback: WriteCallback);

    /// A human-readable name for logging.
    fn name(&self) -> &'static str;
}
