//! Error types for Synheart Cognition
//!
//! The inference core itself is total; these errors only arise at the edges
//! where text is parsed or configuration is loaded.

use thiserror::Error;

/// Errors that can occur while preparing input for, or encoding output of,
/// the cognitive-state pipeline
#[derive(Debug, Error)]
pub enum CognitionError {
    #[error("Failed to parse signal samples: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid sample on line {line}: {message}")]
    InvalidSampleLine { line: usize, message: String },

    #[error("Unknown cognitive state: {0}")]
    UnknownState(String),

    #[error("Unknown adaptation mode: {0}")]
    UnknownAdaptationMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
