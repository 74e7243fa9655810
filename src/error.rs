//! Error types for the card renderer

use thiserror::Error;

/// Result type alias for flowcard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing a card.
///
/// The rendering core itself is total: malformed style or content data
/// degrades to documented fallbacks instead of erroring. The variants here
/// cover the boundaries the crate does not control, such as flow files,
/// completion providers and the output sink.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or parse a flow file
    #[error("Failed to load flow: {0}")]
    FlowError(String),

    /// Failed to write the rendered image to its destination
    #[error("Failed to write card: {0}")]
    SinkError(String),

    /// Failed to encode the canvas as PNG
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// Completion-cache store could not be read or appended to
    #[error("Completion cache error: {0}")]
    CacheError(String),

    /// Completion provider failed to produce a response
    #[error("Completion failed: {0}")]
    CompletionError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::SinkError(err.to_string())
    }
}
