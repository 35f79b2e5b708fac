// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0}")]
    Io(#[from] std::io::Error), // Opening/reading the document

    #[error("Failed to decode PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to extract text from page {page}: {message}")]
    PageText { page: u32, message: String },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0} section not found")]
    SectionNotFound(String),

    #[error("Capture group '{0}' missing from matched line")]
    MissingGroup(&'static str),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}
