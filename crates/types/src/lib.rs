//! Plain value types shared by the pipeline, the backend traits and the
//! backend implementations.
//!
//! - [`PageFormat`] and its parts describe the page the document is laid out on.
//! - [`PageRange`] selects pages for the write stage.
//! - [`LayoutResult`] carries pagination metadata from layout to write.

pub mod format;
pub mod layout;
pub mod page_range;

pub use format::{FormatError, Margins, MediaSize, PageFormat, Resolution};
pub use layout::{LayoutResult, PageCount};
pub use page_range::{PageRange, ReversedPageRange};
