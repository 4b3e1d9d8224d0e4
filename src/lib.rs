//! Captures an already-rendered document surface as a paginated PDF file.
//!
//! A job lays the surface out through its [`RenderingBackend`], opens the
//! destination file, asks the backend to write every page into it, and
//! reports a single [`PipelineOutcome`]. The surface is disposed on every
//! path before the outcome is delivered.

pub mod error;
pub mod pipeline;

pub use error::{FailureKind, PipelineError, RenderFailure};
pub use pipeline::{
    Callbacks, CompletionHandler, Pipeline, PipelineBuilder, PipelineConfig, PipelineOutcome,
};

pub use folio_traits::{
    ContentSurface, LayoutCallback, LayoutCompletion, OutputResource, RenderingBackend,
    WriteCallback, WriteCompletion,
};
pub use folio_types::{LayoutResult, Margins, MediaSize, PageCount, PageFormat, PageRange, Resolution};

/// The reference plain-text backend.
pub use folio_render_lopdf as text;
