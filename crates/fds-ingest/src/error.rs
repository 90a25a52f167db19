//! Error types for rate ingestion.

use std::path::PathBuf;

use fds_model::ModelError;
use thiserror::Error;

/// Errors that can occur while resolving a rate mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// The target table yielded no usable rate rows.
    #[error("no rows parsed from sales tax table id={table_id}")]
    Extraction { table_id: String },

    /// A percent cell could not be parsed.
    #[error("invalid percent value {text:?}")]
    InvalidPercent { text: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Network or protocol failure.
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Cache strategy requested but the cache file does not exist.
    #[error("sales tax cache missing: {path}")]
    MissingCache { path: PathBuf },

    /// Cache strategy requested but the cache file holds no rates.
    #[error("no rates in cache file: {path}")]
    EmptyCache { path: PathBuf },

    /// Reading or writing the cache file failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestError {
    /// Returns true when the failure was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true for network, timeout, and HTTP status failures.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Fetch { .. } | Self::HttpStatus { .. }
        )
    }

    /// Returns true when a requested cache was absent or empty.
    #[must_use]
    pub fn is_missing_cache(&self) -> bool {
        matches!(self, Self::MissingCache { .. } | Self::EmptyCache { .. })
    }
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_failures() {
        let timeout = IngestError::Timeout {
            url: "https://example.test".to_string(),
            timeout_secs: 30,
        };
        assert!(timeout.is_timeout());
        assert!(timeout.is_fetch_failure());

        let status = IngestError::HttpStatus {
            url: "https://example.test".to_string(),
            status: 503,
        };
        assert!(!status.is_timeout());
        assert!(status.is_fetch_failure());

        let missing = IngestError::MissingCache {
            path: PathBuf::from("sources/rates.json"),
        };
        assert!(missing.is_missing_cache());
        assert!(!missing.is_fetch_failure());
    }

    #[test]
    fn extraction_message_names_table() {
        let err = IngestError::Extraction {
            table_id: "tablepress-796".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no rows parsed from sales tax table id=tablepress-796"
        );
    }
}
