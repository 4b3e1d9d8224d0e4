use serde::{Deserialize, Serialize};

/// How many pages a layout produced. Backends that cannot count ahead of the
/// write stage report `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageCount {
    Known(usize),
    Unknown,
}

impl PageCount {
    pub fn known(&self) -> Option<usize> {
        match *self {
            PageCount::Known(n) => Some(n),
            PageCount::Unknown => None,
        }
    }
}

/// Pagination metadata handed from the layout stage to the write stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub document_name: String,
    pub page_count: PageCount,
    /// Whether the content changed since the previous layout of the same surface.
    pub changed: bool,
}

impl LayoutResult {
    pub fn new(document_name: impl Into<String>, page_count: PageCount, changed: bool) -> Self {
        Self {
            document_name: document_name.into(),
            page_count,
            changed,
        }
    }
}
