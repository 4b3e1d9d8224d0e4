use folio_traits::ContentSurface;
use log::{debug, warn};

/// Owns a job's content surface and disposes it exactly once: on
/// [`release`](SurfaceGuard::release), or on drop if the job is abandoned.
pub(crate) struct SurfaceGuard<S: ContentSurface> {
    surface: Option<S>,
    job_id: u64,
}

impl<S: ContentSurface> SurfaceGuard<S> {
    pub(crate) fn new(surface: S, job_id: u64) -> Self {
        Self {
            surface: Some(surface),
            job_id,
        }
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Disposes the surface at a terminal transition.
    pub(crate) fn release(mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
            debug!("[JOB-{}] Content surface disposed.", self.job_id);
        }
    }
}

impl<S: ContentSurface> Drop for SurfaceGuard<S> {
    fn drop(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            warn!(
                "[JOB-{}] Job dropped before reaching a terminal state; disposing its content surface.",
                self.job_id
            );
            surface.dispose();
        }
    }
}
