use crate::error::RenderFailure;
use std::path::PathBuf;

/// The single terminal value of a job.
pub type PipelineOutcome = Result<PathBuf, RenderFailure>;

/// Receives the outcome of a job. Exactly one of the two methods is called,
/// exactly once, after the content surface has been disposed.
///
/// Any `FnOnce(PipelineOutcome)` closure is a handler; use [`Callbacks`] to
/// supply the two variants separately.
pub trait CompletionHandler: Send + 'static {
    fn on_success(self: Box<Self>, file: PathBuf);

    fn on_error(self: Box<Self>, failure: RenderFailure);
}

impl<F> CompletionHandler for F
where
    F: FnOnce(PipelineOutcome) + Send + 'static,
{
    fn on_success(self: Box<Self>, file: PathBuf) {
        (*self)(Ok(file))
    }

    fn on_error(self: Box<Self>, failure: RenderFailure) {
        (*self)(Err(failure))
    }
}

/// A handler built from separate success and error closures.
pub struct Callbacks<S, E> {
    on_success: S,
    on_error: E,
}

impl<S, E> Callbacks<S, E>
where
    S: FnOnce(PathBuf) + Send + 'static,
    E: FnOnce(RenderFailure) + Send + 'static,
{
    pub fn new(on_success: S, on_error: E) -> Self {
        Self {
            on_success,
            on_error,
        }
    }
}

impl<S, E> CompletionHandler for Callbacks<S, E>
where
    S: FnOnce(PathBuf) + Send + 'static,
    E: FnOnce(RenderFailure) + Send + 'static,
{
    fn on_success(self: Box<Self>, file: PathBuf) {
        let this = *self;
        (this.on_success)(file)
    }

    fn on_error(self: Box<Self>, failure: RenderFailure) {
        let this = *self;
        (this.on_error)(failure)
    }
}

pub(crate) fn deliver(handler: Box<dyn CompletionHandler>, outcome: PipelineOutcome) {
    match outcome {
        Ok(file) => handler.on_success(file),
        Err(failure) => handler.on_error(failure),
    }
}
