//! Change tracking for transform runs.
//!
//! Every write the engine performs is recorded with the rule that made it,
//! so a derived value can always be traced back to its rule and location.
//! The dirty flag is simply "the log is non-empty".

use std::collections::BTreeMap;
use std::fmt;

use fds_model::DomainKey;

/// Rule that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// `tax_proxies.sales_effective_rate` from the rate snapshot.
    TaxSync,
    /// Per-domain enrichment, including number normalization.
    Enrich(DomainKey),
    /// Root `notes`, `generated_at`, `version` and `sources`.
    Metadata,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::TaxSync => f.write_str("tax_sync"),
            Rule::Enrich(domain) => write!(f, "enrich:{domain}"),
            Rule::Metadata => f.write_str("metadata"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// An existing field was overwritten (or set for the first time).
    Field(&'static str),
    /// A derived action was added at `index` in its domain's list.
    Inserted { index: usize },
}

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub rule: Rule,
    pub jurisdiction: Option<String>,
    pub action: Option<String>,
    pub kind: ChangeKind,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.rule)?;
        if let Some(jurisdiction) = &self.jurisdiction {
            write!(f, " {jurisdiction}")?;
        }
        if let Some(action) = &self.action {
            write!(f, " / {action}")?;
        }
        match &self.kind {
            ChangeKind::Field(field) => write!(f, ": {field}"),
            ChangeKind::Inserted { index } => write!(f, ": inserted at {index}"),
        }
    }
}

/// Outcome of a transform run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub changes: Vec<Change>,
    pub jurisdictions: usize,
}

impl TransformReport {
    /// True when at least one field was written or action inserted.
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of inserted actions.
    pub fn insertions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c.kind, ChangeKind::Inserted { .. }))
            .count()
    }

    /// Change counts per rule, in rule order.
    pub fn counts_by_rule(&self) -> BTreeMap<Rule, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            *counts.entry(change.rule).or_insert(0) += 1;
        }
        counts
    }

    pub(crate) fn record(
        &mut self,
        rule: Rule,
        jurisdiction: Option<&str>,
        action: Option<&str>,
        kind: ChangeKind,
    ) {
        self.changes.push(Change {
            rule,
            jurisdiction: jurisdiction.map(str::to_string),
            action: action.map(str::to_string),
            kind,
        });
    }
}

/// Write `value` into `slot` only when it differs. Returns whether it wrote.
pub(crate) fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
