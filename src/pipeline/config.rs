use folio_types::PageFormat;
use std::path::Path;

/// Used when the output path has no file name to borrow.
pub const FALLBACK_DOCUMENT_NAME: &str = "document.pdf";

/// Settings shared by every job a pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// The page format handed to the layout stage.
    pub page_format: PageFormat,
    /// Overrides the document name otherwise derived from the output file name.
    pub document_name: Option<String>,
}

impl PipelineConfig {
    /// The name the backend should give the document written to `output_path`.
    pub fn document_name_for(&self, output_path: &Path) -> String {
        if let Some(name) = &self.document_name {
            return name.clone();
        }
        output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_DOCUMENT_NAME.to_string())
    }
}
