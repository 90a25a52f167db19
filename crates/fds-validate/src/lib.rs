//! Structural and numeric validation of the friction dataset.
//!
//! Document- and jurisdiction-level problems abort immediately with
//! [`ValidationError::Fatal`]. Per-action problems are collected as
//! [`Finding`]s across the whole document and reported together as
//! [`ValidationError::Findings`]. A passing run returns a
//! [`ValidationSummary`] with per-domain statistics.

pub mod error;
pub mod finding;
pub mod summary;
pub mod validator;

pub use error::{PREVIEW_LIMIT, Result, ValidationError};
pub use finding::{Finding, Issue};
pub use summary::{TOP_DAYS_MAX, Tally, ValidationSummary};
pub use validator::{validate_dataset, validate_document, validate_path};
