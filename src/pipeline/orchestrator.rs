// src/pipeline/orchestrator.rs
use super::config::PipelineConfig;
use super::handler::{CompletionHandler, PipelineOutcome};
use super::job::RenderJob;
use folio_traits::ContentSurface;
use folio_types::PageFormat;
use log::{debug, warn};
use std::path::PathBuf;
use tokio::sync::oneshot;

/// Captures content surfaces as PDF files.
///
/// Each call to [`run`](Pipeline::run) or [`render`](Pipeline::render) is an
/// independent job that takes ownership of its surface. The pipeline holds no
/// threads of its own; a job advances only when the surface's backend
/// completes a request.
///
/// There is no timeout. A backend that never completes a request leaves its
/// job suspended for good: no outcome is ever delivered, and the surface is
/// disposed only if the backend drops the pending continuation.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub(crate) fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn page_format(&self) -> &PageFormat {
        &self.config.page_format
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Starts a job and returns immediately. `handler` is invoked exactly once
    /// with the outcome, after `surface` has been disposed, on whatever thread
    /// the backend completes on.
    ///
    /// The parent directory of `output_path` must already exist.
    pub fn run<S, H>(&self, surface: S, output_path: impl Into<PathBuf>, handler: H)
    where
        S: ContentSurface,
        H: CompletionHandler,
    {
        let output_path = output_path.into();
        let document_name = self.config.document_name_for(&output_path);
        let job = RenderJob::new(
            surface,
            &document_name,
            output_path,
            self.config.page_format,
            Box::new(handler),
        );
        job.start();
    }

    /// Runs a job and waits for its outcome.
    ///
    /// Dropping the returned future does not stop the job; it still runs to a
    /// terminal state and disposes the surface.
    pub async fn render<S>(&self, surface: S, output_path: impl Into<PathBuf>) -> PipelineOutcome
    where
        S: ContentSurface,
    {
        let (tx, rx) = oneshot::channel();
        self.run(surface, output_path, move |outcome: PipelineOutcome| {
            if tx.send(outcome).is_err() {
                debug!("Outcome arrived after the render future was dropped.");
            }
        });

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("Backend dropped the job without completing it; the render will never resolve.");
                std::future::pending().await
            }
        }
    }
}
