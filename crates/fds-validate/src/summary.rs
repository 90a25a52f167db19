//! Diagnostic statistics from a passing validation run.

use std::collections::BTreeMap;

use fds_model::DomainKey;

/// How many `days_max` values to report per domain.
pub const TOP_DAYS_MAX: usize = 3;

/// Occurrence counts that remember first-seen order for tie breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(i64, usize)>,
}

impl Tally {
    pub fn add(&mut self, value: i64) {
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((value, 1)),
        }
    }

    /// Up to `n` `(value, count)` pairs, most common first; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(i64, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregates emitted when validation passes. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub version: String,
    pub jurisdictions: usize,
    pub actions_per_domain: BTreeMap<DomainKey, usize>,
    pub days_max: BTreeMap<DomainKey, Tally>,
}

impl ValidationSummary {
    pub fn total_actions(&self) -> usize {
        self.actions_per_domain.values().sum()
    }

    /// Most common `days_max` values for `domain`.
    pub fn top_days_max(&self, domain: DomainKey) -> Vec<(i64, usize)> {
        self.days_max
            .get(&domain)
            .map(|tally| tally.most_common(TOP_DAYS_MAX))
            .unwrap_or_default()
    }
}
