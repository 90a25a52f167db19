//! Error types for dataset validation.

use fds_model::ModelError;
use thiserror::Error;

use crate::finding::Finding;

/// Findings shown when a run fails.
pub const PREVIEW_LIMIT: usize = 30;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// A document-level or jurisdiction-level check failed; the sweep stopped.
    #[error("{message}")]
    Fatal { message: String },

    /// The per-action sweep completed with findings.
    #[error("found {} invalid actions", findings.len())]
    Findings { findings: Vec<Finding> },

    /// The dataset file could not be read or parsed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ValidationError {
    pub(crate) fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// The first [`PREVIEW_LIMIT`] findings, or nothing for other errors.
    pub fn preview(&self) -> &[Finding] {
        match self {
            Self::Findings { findings } => &findings[..findings.len().min(PREVIEW_LIMIT)],
            _ => &[],
        }
    }

    /// Total number of findings, zero for other errors.
    pub fn finding_count(&self) -> usize {
        match self {
            Self::Findings { findings } => findings.len(),
            _ => 0,
        }
    }
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
