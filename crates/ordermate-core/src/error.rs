//! Error types for the OrderMate engine.

use thiserror::Error;

/// A shared error type for the OrderMate engine and its collaborators.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Note that structured-query misses (`OrderNotFound` and friends) are not
/// errors: they are ordinary lookup outcomes, classified by
/// [`crate::orders::LookupOutcome`] and turned into response sentences.
#[derive(Error, Debug)]
pub enum OrdermateError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// A persisted transcript line that cannot be parsed back into
    /// `(timestamp, sender, content)`. This is a data-integrity fault:
    /// loading the session fails rather than silently dropping or guessing
    /// content.
    #[error("malformed transcript line {line_number} in '{storage_key}': {line:?}")]
    MalformedTranscriptLine {
        storage_key: String,
        line_number: usize,
        line: String,
    },

    /// The generator could not produce a response (transport failure,
    /// bad status, undecodable body).
    #[error("generation failed: {0}")]
    Generation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrdermateError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a malformed-transcript error
    pub fn is_malformed_transcript(&self) -> bool {
        matches!(self, Self::MalformedTranscriptLine { .. })
    }

    /// Check if this is a generation error
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

impl From<std::io::Error> for OrdermateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for OrdermateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for OrdermateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, OrdermateError>`.
pub type Result<T> = std::result::Result<T, OrdermateError>;
