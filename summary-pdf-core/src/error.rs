use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("No export source: summary text and fallback text are both empty")]
    MissingExportSource,

    #[error("Packaging error: {0}")]
    Packaging(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;
