// src/error.rs
use folio_render_lopdf::BackendError;
use folio_types::FormatError;
use thiserror::Error;

/// Why a job ended without producing a file. Exactly one of these is
/// delivered per failed job; none are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    #[error("Layout failed: {0}")]
    LayoutFailed(String),

    #[error("Could not acquire output resource {0}")]
    ResourceAcquisition(String),

    #[error("PDF write failed: {0}")]
    WriteFailed(String),

    #[error("PDF write cancelled")]
    WriteCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    LayoutFailed,
    ResourceAcquisition,
    WriteFailed,
    WriteCancelled,
}

impl RenderFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            RenderFailure::LayoutFailed(_) => FailureKind::LayoutFailed,
            RenderFailure::ResourceAcquisition(_) => FailureKind::ResourceAcquisition,
            RenderFailure::WriteFailed(_) => FailureKind::WriteFailed,
            RenderFailure::WriteCancelled => FailureKind::WriteCancelled,
        }
    }

    /// The diagnostic reported by the failing stage. Cancellation has none.
    pub fn message(&self) -> Option<&str> {
        match self {
            RenderFailure::LayoutFailed(m)
            | RenderFailure::ResourceAcquisition(m)
            | RenderFailure::WriteFailed(m) => Some(m),
            RenderFailure::WriteCancelled => None,
        }
    }
}

/// A comprehensive error type for configuring and driving the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderFailure),

    #[error("Invalid page format: {0}")]
    Format(#[from] FormatError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
