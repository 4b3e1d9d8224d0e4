// src/pipeline/builder.rs
use super::config::PipelineConfig;
use super::orchestrator::Pipeline;
use crate::error::PipelineError;
use folio_types::{Margins, MediaSize, PageFormat, Resolution};
use std::fs;
use std::io;
use std::path::Path;

/// A builder for creating a [`Pipeline`].
///
/// Starts from the fixed format: ISO A4, 1200x600 dpi, no margins.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole page format.
    pub fn with_page_format(mut self, format: PageFormat) -> Self {
        self.config.page_format = format;
        self
    }

    pub fn with_media_size(mut self, media_size: MediaSize) -> Self {
        self.config.page_format.media_size = media_size;
        self
    }

    pub fn with_resolution(mut self, horizontal_dpi: u32, vertical_dpi: u32) -> Self {
        self.config.page_format.resolution = Resolution::new(horizontal_dpi, vertical_dpi);
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.page_format.margins = margins;
        self
    }

    /// Names the document instead of using the output file name.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.config.document_name = Some(name.into());
        self
    }

    /// Reads the page format from a JSON string.
    pub fn with_page_format_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.config.page_format = PageFormat::from_json(json)?;
        Ok(self)
    }

    /// Reads the page format from a JSON file.
    pub fn with_page_format_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read page format from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.with_page_format_json(&json)
    }

    /// Validates the configuration and creates the [`Pipeline`].
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        self.config.page_format.validate()?;
        if let Some(name) = &self.config.document_name
            && name.trim().is_empty()
        {
            return Err(PipelineError::Config("Document name must not be empty.".to_string()));
        }
        Ok(Pipeline::new(self.config))
    }
}
