//! Error types for the review sentiment classifier.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure while reading a lexicon or model artefact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a lexicon file
    #[error("Lexicon error on line {line}: {reason}")]
    Lexicon { line: usize, reason: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Trained model could not be loaded or failed during inference
    #[error("Model error: {0}")]
    Model(String),
}

impl Error {
    pub fn lexicon(line: usize, reason: impl Into<String>) -> Self {
        Error::Lexicon {
            line,
            reason: reason.into(),
        }
    }
}
