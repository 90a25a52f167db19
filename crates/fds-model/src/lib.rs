//! Friction dataset model.
//!
//! - **dataset**: `Dataset` → `Jurisdiction` → `Domain` → `Action` records
//! - **domain**: the closed set of required domain keys
//! - **rates**: external rate snapshots and provenance records
//! - **io**: wholesale JSON load/save with stable formatting
//! - **numeric**: rounding and clamping helpers

pub mod dataset;
pub mod domain;
pub mod error;
pub mod io;
pub mod numeric;
pub mod rates;

pub use dataset::{
    Action, DEFAULT_DAYS_MAX, DEFAULT_WEIGHT, Dataset, Domain, Jurisdiction, integer_from_value,
};
pub use domain::DomainKey;
pub use error::{ModelError, Result};
pub use io::{load_dataset, read_json, save_dataset, write_json};
pub use numeric::{clamp_float, clamp_int, round_to};
pub use rates::{RateProvenance, RateSnapshot, SourceRecord};
