//! Error types for dataset transforms.

use thiserror::Error;

/// Fatal transform failures. Both are detected before any mutation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The rate snapshot has no entry for a jurisdiction in the dataset.
    #[error("missing sales tax rate for jurisdiction: {jurisdiction}")]
    MissingRate { jurisdiction: String },

    /// The in-memory dataset violates a precondition of the rule set.
    #[error("dataset structure error: {message}")]
    Structure { message: String },
}

impl TransformError {
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }
}

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
