//! The per-invocation state machine.
//!
//! A [`RenderJob`] moves strictly forward through
//! `Init → LayingOut → Writing → {DoneOk | DoneErr}`. It performs no work
//! between submitting a request and the backend completing it: the job itself
//! is moved into the continuation and resumed from whatever thread the backend
//! completes on.

use super::guard::SurfaceGuard;
use super::handler::{CompletionHandler, PipelineOutcome, deliver};
use crate::error::RenderFailure;
use folio_traits::{
    ContentSurface, LayoutCallback, LayoutCompletion, OutputResource, ReleaseHandle,
    RenderingBackend, WriteCallback, WriteCompletion,
};
use folio_types::{PageFormat, PageRange};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobState {
    Init,
    LayingOut,
    Writing,
    DoneOk,
    DoneErr,
}

impl JobState {
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, JobState::DoneOk | JobState::DoneErr)
    }
}

pub(crate) struct RenderJob<S: ContentSurface> {
    id: u64,
    state: JobState,
    surface: SurfaceGuard<S>,
    backend: Arc<dyn RenderingBackend>,
    output_path: PathBuf,
    format: PageFormat,
    handler: Box<dyn CompletionHandler>,
}

impl<S: ContentSurface> RenderJob<S> {
    pub(crate) fn new(
        surface: S,
        document_name: &str,
        output_path: PathBuf,
        format: PageFormat,
        handler: Box<dyn CompletionHandler>,
    ) -> Self {
        let id = NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed);
        let backend = surface.create_backend(document_name);
        Self {
            id,
            state: JobState::Init,
            surface: SurfaceGuard::new(surface, id),
            backend,
            output_path,
            format,
            handler,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> JobState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> Option<&S> {
        self.surface.surface()
    }

    fn transition(&mut self, next: JobState) {
        debug_assert!(!self.state.is_terminal(), "job {} already finished", self.id);
        debug!("[JOB-{}] {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
    }

    /// `Init → LayingOut`: submits the layout request.
    pub(crate) fn start(mut self) {
        debug_assert_eq!(self.state, JobState::Init);
        self.transition(JobState::LayingOut);
        info!(
            "[JOB-{}] Requesting layout of '{}' from {}.",
            self.id,
            self.output_path.display(),
            self.backend.name()
        );

        let backend = Arc::clone(&self.backend);
        let format = self.format;
        backend.layout(
            &format,
            LayoutCallback::new(move |completion| self.on_layout(completion)),
        );
    }

    /// `LayingOut → Writing`, or `LayingOut → DoneErr`.
    pub(crate) fn on_layout(mut self, completion: LayoutCompletion) {
        debug_assert_eq!(self.state, JobState::LayingOut);
        let layout = match completion {
            LayoutCompletion::Finished(layout) => layout,
            LayoutCompletion::Failed(diagnostic) => {
                warn!("[JOB-{}] Layout failed: {}", self.id, diagnostic);
                return self.finish(Err(RenderFailure::LayoutFailed(diagnostic)));
            }
        };
        info!(
            "[JOB-{}] Layout finished for '{}': {:?} (changed: {}).",
            self.id, layout.document_name, layout.page_count, layout.changed
        );

        let sink = match OutputResource::acquire(&self.output_path) {
            Ok(sink) => sink,
            Err(e) => {
                error!(
                    "[JOB-{}] Could not open '{}' for writing: {}",
                    self.id,
                    self.output_path.display(),
                    e
                );
                let message = format!("'{}': {}", self.output_path.display(), e);
                return self.finish(Err(RenderFailure::ResourceAcquisition(message)));
            }
        };

        self.transition(JobState::Writing);
        let release = sink.release_handle();
        let backend = Arc::clone(&self.backend);
        backend.write(
            &[PageRange::ALL_PAGES],
            sink,
            WriteCallback::new(move |completion| self.on_write(completion, release)),
        );
    }

    /// `Writing → DoneOk`, or `Writing → DoneErr`. The output resource is
    /// closed first, however the write ended.
    pub(crate) fn on_write(self, completion: WriteCompletion, release: ReleaseHandle) {
        debug_assert_eq!(self.state, JobState::Writing);
        if release.release() {
            debug!("[JOB-{}] Closed output resource left open by the backend.", self.id);
        }

        let outcome = match completion {
            WriteCompletion::Finished(pages) => {
                let written: Vec<String> = pages.iter().map(ToString::to_string).collect();
                info!("[JOB-{}] Wrote {}.", self.id, written.join(", "));
                Ok(self.output_path.clone())
            }
            WriteCompletion::Failed(diagnostic) => {
                warn!("[JOB-{}] Write failed: {}", self.id, diagnostic);
                Err(RenderFailure::WriteFailed(diagnostic))
            }
            WriteCompletion::Cancelled => {
                warn!("[JOB-{}] Write cancelled by the backend.", self.id);
                Err(RenderFailure::WriteCancelled)
            }
        };
        self.finish(outcome)
    }

    /// Enters a terminal state, disposes the surface, then delivers the outcome.
    fn finish(mut self, outcome: PipelineOutcome) {
        let terminal = if outcome.is_ok() {
            JobState::DoneOk
        } else {
            JobState::DoneErr
        };
        self.transition(terminal);

        let RenderJob {
            id,
            surface,
            handler,
            ..
        } = self;
        surface.release();
        match &outcome {
            Ok(path) => info!("[JOB-{}] Finished: '{}'.", id, path.display()),
            Err(failure) => info!("[JOB-{}] Finished with error: {}", id, failure),
        }
        deliver(handler, outcome);
    }
}
