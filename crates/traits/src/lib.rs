//! Platform-agnostic abstractions for the folio pipeline.
//!
//! - [`ContentSurface`]: the already-loaded thing being captured
//! - [`RenderingBackend`]: the two-phase layout/write protocol
//! - [`LayoutCallback`] / [`WriteCallback`]: one-shot continuations a backend
//!   completes from its own execution context
//! - [`OutputResource`]: the writable file handle given to the write stage

pub mod backend;
pub mod sink;
pub mod surface;

pub use backend::{LayoutCallback, LayoutCompletion, RenderingBackend, WriteCallback, WriteCompletion};
pub use sink::{OutputResource, ReleaseHandle};
pub use surface::ContentSurface;
