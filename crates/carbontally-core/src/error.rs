//! Error types for carbontally

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CarbontallyError {
    // Format errors
    #[error("Unsupported file format '{extension}': only XML and PDF files are accepted")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse {format} file: {message}")]
    Parse { format: String, message: String },

    #[error("File '{file_name}' failed validation: {reason}")]
    FileRejected { file_name: String, reason: String },

    // Data errors
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // Synthesis errors
    #[error("Synthetic data required for {context} but synthesis is disabled")]
    SynthesisDisabled { context: String },

    // Session errors
    #[error("No session entry with id {id}")]
    EntryNotFound { id: Uuid },

    #[error("Cannot retry '{file_name}': original file contents are no longer available")]
    RetryUnavailable { file_name: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarbontallyError>;
