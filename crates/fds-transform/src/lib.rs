//! Idempotent enrichment of the friction dataset.
//!
//! [`apply_transforms`] applies rule set 2.5 to a loaded [`fds_model::Dataset`]
//! using a resolved [`fds_model::RateSnapshot`]. Every write is compared
//! against the current value first, so a second run over its own output
//! produces an empty [`TransformReport`].
//!
//! - **engine**: preflight, tax sync, metadata stamp, rule ordering
//! - **enrichment**: one enricher per required domain
//! - **merge**: name-keyed upsert and anchored insertion
//! - **changes**: the change log returned to callers

pub mod changes;
mod enrichment;
pub mod engine;
pub mod error;
pub mod merge;
pub mod options;

pub use changes::{Change, ChangeKind, Rule, TransformReport};
pub use engine::{
    RATE_DECIMALS, RULESET_NOTES, RULESET_VERSION, SALES_EFFECTIVE_RATE, SALES_TAX_SOURCE_KEY,
    apply_transforms, source_record,
};
pub use error::{Result, TransformError};
pub use merge::{UpsertOutcome, upsert_action, upsert_action_before};
pub use options::{
    DEFAULT_HOUSING_BUY_DAYS_MAX, DEFAULT_HOUSING_BUY_PERMISSION_MAX, TransformOptions,
};
