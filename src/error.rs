//! Error types for wavegen

use thiserror::Error;

/// Result type alias for wavegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavegen
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Format error (malformed container or header)
    #[error("Format error: {0}")]
    Format(String),

    /// Analysis error (no usable duration or signal found)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Buffer too small
    #[error("Buffer too small: need {need}, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

impl Error {
    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an analysis error
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        Error::Analysis(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }
}
