//! Per-action validation findings.
//!
//! Findings are non-fatal: the sweep collects every one of them before the
//! run fails once.

use std::fmt;

use fds_model::DomainKey;

/// What is wrong with an action. Each variant carries only what its message needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// The entry in `actions` is not an object.
    NotAnObject,
    /// `name` is absent, not a string, or blank.
    MissingName,
    /// Another action in the same domain already has this name.
    DuplicateName,
    /// A required numeric field is absent.
    MissingField { field: &'static str },
    /// A count field is not a non-negative integer. `value` is the JSON text.
    InvalidInteger { field: &'static str, value: String },
    /// `penalty_severity` is not a number in `[0, 1]`.
    InvalidSeverity { value: String },
    /// `median_days` is above the effective `days_max`.
    ExceedsDaysMax { median_days: i64, days_max: i64 },
}

impl Issue {
    pub fn message(&self) -> String {
        match self {
            Issue::NotAnObject => "action is not an object".to_string(),
            Issue::MissingName => "missing name".to_string(),
            Issue::DuplicateName => "duplicate action name".to_string(),
            Issue::MissingField { field } => format!("missing {field}"),
            Issue::InvalidInteger { field, value } => format!("invalid {field}={value}"),
            Issue::InvalidSeverity { value } => format!("invalid penalty_severity={value}"),
            Issue::ExceedsDaysMax {
                median_days,
                days_max,
            } => format!("median_days {median_days} exceeds days_max {days_max}"),
        }
    }
}

/// A located issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub jurisdiction: String,
    pub domain: DomainKey,
    /// `None` when the action has no usable name.
    pub action: Option<String>,
    pub issue: Issue,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}: {}",
            self.jurisdiction,
            self.domain,
            self.action.as_deref().unwrap_or("<unknown>"),
            self.issue.message()
        )
    }
}
