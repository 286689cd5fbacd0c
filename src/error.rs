//! Error types for deck generation and export

use thiserror::Error;

/// Result type alias for deck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or exporting a deck
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize a collaborator (HTTP client, worker thread)
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    /// The image-generation collaborator failed. Terminal for the current
    /// batch; no retry is attempted.
    #[error("Image generation failed: {0}")]
    GenerationError(String),

    /// Failed to produce the downloadable deck sheet
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
