//! Friction dataset records.
//!
//! Ownership is rooted in [`Dataset`]: jurisdictions own their domains, domains
//! own their ordered action lists. Fields the model does not name are kept in
//! `extra` maps so a load/save cycle never drops data.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::DomainKey;
use crate::error::{ModelError, Result};

/// Root friction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub notes: String,
    /// Named provenance records.
    #[serde(default)]
    pub sources: BTreeMap<String, Value>,
    pub jurisdictions: Vec<Jurisdiction>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub name: String,
    #[serde(default)]
    pub tax_proxies: BTreeMap<String, f64>,
    #[serde(default)]
    pub domains: BTreeMap<String, Domain>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A regulated activity with its friction attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    /// Permits or approvals required.
    #[serde(deserialize_with = "lenient_int")]
    pub permission_count: i64,
    /// Typical elapsed days.
    #[serde(deserialize_with = "lenient_int")]
    pub median_days: i64,
    /// Consequence weight of non-compliance, 0..=1.
    pub penalty_severity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_max: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Scorer default for `days_max` when an action does not set one.
pub const DEFAULT_DAYS_MAX: i64 = 180;

/// Scorer default for `weight` when an action does not set one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

impl Dataset {
    /// Parse a dataset document, reporting shape problems as structure errors.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ModelError::structure(e.to_string()))
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        crate::io::to_pretty_json(self, "dataset")
    }

    pub fn jurisdiction(&self, name: &str) -> Option<&Jurisdiction> {
        self.jurisdictions.iter().find(|j| j.name == name)
    }

    pub fn jurisdiction_mut(&mut self, name: &str) -> Option<&mut Jurisdiction> {
        self.jurisdictions.iter_mut().find(|j| j.name == name)
    }

    /// Total number of actions across all jurisdictions and domains.
    pub fn action_count(&self) -> usize {
        self.jurisdictions
            .iter()
            .flat_map(|j| j.domains.values())
            .map(|d| d.actions.len())
            .sum()
    }
}

impl Jurisdiction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_proxies: BTreeMap::new(),
            domains: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn domain(&self, key: DomainKey) -> Option<&Domain> {
        self.domains.get(key.as_str())
    }

    pub fn domain_mut(&mut self, key: DomainKey) -> Option<&mut Domain> {
        self.domains.get_mut(key.as_str())
    }

    /// Replace (or add) a domain's action list.
    pub fn with_actions(mut self, key: DomainKey, actions: Vec<Action>) -> Self {
        self.domains.entry(key.as_str().to_string()).or_default().actions = actions;
        self
    }
}

impl Domain {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        permission_count: i64,
        median_days: i64,
        penalty_severity: f64,
    ) -> Self {
        Self {
            name: name.into(),
            permission_count,
            median_days,
            penalty_severity,
            weight: None,
            days_max: None,
            permission_max: None,
            source: None,
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_ceilings(mut self, days_max: i64, permission_max: i64) -> Self {
        self.days_max = Some(days_max);
        self.permission_max = Some(permission_max);
        self
    }

    /// Weight as the scorer sees it.
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }

    /// `days_max` as the scorer sees it.
    pub fn effective_days_max(&self) -> i64 {
        self.days_max.unwrap_or(DEFAULT_DAYS_MAX)
    }
}

/// Read a JSON number as an integer, truncating fractional values toward zero.
pub fn integer_from_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value(&value)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, found {value}")))
}

fn lenient_opt_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    integer_from_value(&value)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, found {value}")))
}
