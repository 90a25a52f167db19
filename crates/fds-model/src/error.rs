//! Error types for dataset loading and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, shaping, or writing friction documents.
#[derive(Debug, Error)]
pub enum ModelError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON.
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but does not have the dataset shape.
    #[error("dataset structure error: {message}")]
    Structure { message: String },

    /// Serializing an in-memory value failed.
    #[error("failed to serialize {what}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("failed to replace {target_path} with {temp_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
