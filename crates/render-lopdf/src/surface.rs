use crate::backend::{CancelHandle, LopdfBackend};
use crate::document::TextDocument;
use crate::error::BackendError;
use folio_traits::{ContentSurface, RenderingBackend};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;

/// A loaded [`TextDocument`] ready to be captured.
#[derive(Debug, Clone)]
pub struct TextSurface {
    document: Arc<TextDocument>,
    runtime: Handle,
    cancel: CancelHandle,
    disposed: Arc<AtomicBool>,
}

impl TextSurface {
    pub fn new(document: TextDocument, runtime: Handle) -> Self {
        Self {
            document: Arc::new(document),
            runtime,
            cancel: CancelHandle::new(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Binds the surface to the runtime the caller is running on.
    pub fn on_current_runtime(document: TextDocument) -> Result<Self, BackendError> {
        let runtime = Handle::try_current().map_err(|_| BackendError::NoRuntime)?;
        Ok(Self::new(document, runtime))
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Cancels any write started by a backend of this surface.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Whether this surface (or any clone of it) has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl ContentSurface for TextSurface {
    fn create_backend(&self, document_name: &str) -> Arc<dyn RenderingBackend> {
        Arc::new(LopdfBackend::new(
            document_name,
            Arc::clone(&self.document),
            self.runtime.clone(),
            self.cancel.clone(),
        ))
    }

    fn dispose(&mut self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            debug!("Text surface was already disposed.");
        } else {
            debug!("Disposed text surface.");
        }
    }
}
