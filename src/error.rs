//! Error types for the itinerary library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the itinerary library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Draft (de)serialization error
    #[error("Invalid draft: {0}")]
    Json(#[from] serde_json::Error),

    /// Required overview fields are blank
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// Index-addressed edit outside the collection
    #[error("{section}: index {index} out of range (len {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },

    /// Attempt to remove the only activity of a period
    #[error("Cannot remove the last {0} activity")]
    LastActivity(&'static str),

    /// Field name not known for a record
    #[error("{section}: unknown field '{field}'")]
    UnknownField {
        section: &'static str,
        field: String,
    },

    /// Field value could not be parsed
    #[error("{section}: invalid value '{value}' for '{field}'")]
    InvalidField {
        section: &'static str,
        field: &'static str,
        value: String,
    },

    /// Date parsing error
    #[error("Invalid date expression: {0}")]
    InvalidDateExpression(String),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// PDF without pages
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Export aborted before completion
    #[error("Export cancelled")]
    Cancelled,

    /// General error
    #[error("{0}")]
    General(String),
}
