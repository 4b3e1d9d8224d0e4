use crate::backend::RenderingBackend;
use std::sync::Arc;

/// Something that has already been loaded and can be captured as pages.
///
/// A surface hands out the backend that knows how to lay it out and write it,
/// and is disposed once the job that owns it reaches a terminal state.
pub trait ContentSurface: Send + 'static {
    /// Creates a backend bound to this surface. `document_name` is the name the
    /// produced document is known by, usually the output file name.
    fn create_backend(&self, document_name: &str) -> Arc<dyn RenderingBackend>;

    /// Releases the surface. Called exactly once per job.
    fn dispose(&mut self);
}

impl<S: ContentSurface + ?Sized> ContentSurface for Box<S> {
    fn create_backend(&self, document_name: &str) -> Arc<dyn RenderingBackend> {
        (**self).create_backend(document_name)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}
