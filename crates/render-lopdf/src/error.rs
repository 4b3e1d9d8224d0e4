use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Page format leaves no room for content ({width:.1}x{height:.1} pt printable)")]
    NoPrintableArea { width: f32, height: f32 },

    #[error("Write requested before the document was laid out")]
    NotLaidOut,

    #[error("No tokio runtime available to run the backend on")]
    NoRuntime,

    #[error("Write cancelled")]
    Cancelled,
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        BackendError::Pdf(err.to_string())
    }
}
