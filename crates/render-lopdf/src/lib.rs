//! A reference rendering backend that captures plain-text documents as PDF.
//!
//! [`TextSurface`] is a loaded [`TextDocument`]; its backend,
//! [`LopdfBackend`], paginates the text for the requested page format and
//! writes the selected pages with `lopdf`. All work runs on the blocking pool
//! of a tokio runtime, so completions never arrive on the submitting thread.

mod backend;
mod document;
mod encoding;
mod error;
mod layout;
mod surface;
mod writer;

pub use backend::{CancelHandle, LopdfBackend};
pub use document::{Block, TextDocument};
pub use error::BackendError;
pub use layout::{LaidOutPage, PlacedLine};
pub use surface::TextSurface;
