//! Document walk: fail-fast shape checks, then an exhaustive per-action sweep.
//!
//! The walk runs over the raw JSON document rather than the typed model so
//! that wrong types (a string count, a fractional day count) are reported
//! instead of being rejected or coerced at load time.

use std::collections::HashSet;
use std::path::Path;

use fds_model::{DEFAULT_DAYS_MAX, Dataset, DomainKey, read_json};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{Result, ValidationError};
use crate::finding::{Finding, Issue};
use crate::summary::ValidationSummary;

const REQUIRED_NUMBERS: [&str; 3] = ["permission_count", "median_days", "penalty_severity"];

/// Validate a dataset file.
pub fn validate_path(path: &Path) -> Result<ValidationSummary> {
    let document: Value = read_json(path)?;
    debug!(path = %path.display(), "validating dataset file");
    validate_document(&document)
}

/// Validate an in-memory dataset, as it would be persisted.
pub fn validate_dataset(dataset: &Dataset) -> Result<ValidationSummary> {
    let document = serde_json::to_value(dataset)
        .map_err(|e| ValidationError::fatal(format!("dataset is not serializable: {e}")))?;
    validate_document(&document)
}

/// Validate a raw dataset document.
///
/// # Errors
///
/// [`ValidationError::Fatal`] on the first document- or jurisdiction-level
/// problem; [`ValidationError::Findings`] with every per-action finding once
/// the sweep is complete.
pub fn validate_document(document: &Value) -> Result<ValidationSummary> {
    let Some(version) = document.get("version").and_then(Value::as_str) else {
        return Err(ValidationError::fatal("dataset.version must be a string"));
    };
    let jurisdictions = match document.get("jurisdictions").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err(ValidationError::fatal(
                "dataset.jurisdictions must be a non-empty list",
            ));
        }
    };
    check_unique_names(jurisdictions)?;

    let mut summary = ValidationSummary {
        version: version.to_string(),
        jurisdictions: jurisdictions.len(),
        ..ValidationSummary::default()
    };
    let mut findings = Vec::new();

    for jurisdiction in jurisdictions {
        let Some(jurisdiction) = jurisdiction.as_object() else {
            return Err(ValidationError::fatal("jurisdictions must be objects"));
        };
        let name = match jurisdiction.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(ValidationError::fatal(
                    "jurisdiction.name must be a non-empty string",
                ));
            }
        };
        if !jurisdiction.get("tax_proxies").is_some_and(Value::is_object) {
            return Err(ValidationError::fatal(format!(
                "{name}: tax_proxies must be an object"
            )));
        }
        let Some(domains) = jurisdiction.get("domains").and_then(Value::as_object) else {
            return Err(ValidationError::fatal(format!(
                "{name}: domains must be an object"
            )));
        };

        let missing: Vec<_> = DomainKey::REQUIRED
            .iter()
            .map(DomainKey::as_str)
            .filter(|key| !domains.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::fatal(format!(
                "{name}: missing domains: {}",
                missing.join(", ")
            )));
        }

        for key in DomainKey::REQUIRED {
            let actions = domain_actions(name, key, domains)?;
            sweep_domain(name, key, actions, &mut summary, &mut findings);
        }
    }

    if !findings.is_empty() {
        warn!(findings = findings.len(), "dataset validation failed");
        return Err(ValidationError::Findings { findings });
    }

    info!(
        version = %summary.version,
        jurisdictions = summary.jurisdictions,
        actions = summary.total_actions(),
        "dataset valid"
    );
    Ok(summary)
}

fn check_unique_names(jurisdictions: &[Value]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in jurisdictions
        .iter()
        .filter_map(Value::as_object)
        .map(|j| j.get("name").map_or_else(|| "null".to_string(), Value::to_string))
    {
        if !seen.insert(name) {
            return Err(ValidationError::fatal("jurisdiction names must be unique"));
        }
    }
    Ok(())
}

fn domain_actions<'a>(
    name: &str,
    key: DomainKey,
    domains: &'a Map<String, Value>,
) -> Result<&'a [Value]> {
    let Some(domain) = domains.get(key.as_str()).and_then(Value::as_object) else {
        return Err(ValidationError::fatal(format!(
            "{name}: domain {key} must be an object"
        )));
    };
    match domain.get("actions").and_then(Value::as_array) {
        Some(actions) if !actions.is_empty() => Ok(actions),
        _ => Err(ValidationError::fatal(format!(
            "{name}: domain {key} must have non-empty actions[]"
        ))),
    }
}

fn sweep_domain(
    jurisdiction: &str,
    key: DomainKey,
    actions: &[Value],
    summary: &mut ValidationSummary,
    findings: &mut Vec<Finding>,
) {
    let mut names = HashSet::new();

    for action in actions {
        let mut report = |action: Option<&str>, issue: Issue| {
            findings.push(Finding {
                jurisdiction: jurisdiction.to_string(),
                domain: key,
                action: action.map(str::to_string),
                issue,
            });
        };

        let Some(action) = action.as_object() else {
            report(None, Issue::NotAnObject);
            continue;
        };
        let action_name = match action.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                report(None, Issue::MissingName);
                continue;
            }
        };
        let mut flag = |issue: Issue| report(Some(action_name), issue);

        if !names.insert(action_name) {
            flag(Issue::DuplicateName);
        }

        for field in REQUIRED_NUMBERS {
            if !action.contains_key(field) {
                flag(Issue::MissingField { field });
            }
        }

        check_count(action, "permission_count", &mut flag);
        let median_days = check_count(action, "median_days", &mut flag);
        if let Some(value) = action.get("penalty_severity")
            && !value.as_f64().is_some_and(|s| (0.0..=1.0).contains(&s))
        {
            flag(Issue::InvalidSeverity {
                value: value.to_string(),
            });
        }

        let days_max = match action.get("days_max") {
            None => Some(DEFAULT_DAYS_MAX),
            Some(value) => value.as_i64(),
        };
        if let Some(days_max) = days_max
            && days_max > 0
        {
            summary.days_max.entry(key).or_default().add(days_max);
            if let Some(median_days) = median_days
                && median_days > days_max
            {
                flag(Issue::ExceedsDaysMax {
                    median_days,
                    days_max,
                });
            }
        }

        *summary.actions_per_domain.entry(key).or_insert(0) += 1;
    }
}

/// Check a count field; returns it when it is a valid non-negative integer.
fn check_count(
    action: &Map<String, Value>,
    field: &'static str,
    flag: &mut impl FnMut(Issue),
) -> Option<i64> {
    let value = action.get(field)?;
    match value.as_i64() {
        Some(count) if count >= 0 => Some(count),
        _ => {
            flag(Issue::InvalidInteger {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}
