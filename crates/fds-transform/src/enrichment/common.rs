//! Shared helpers for domain enrichers.

use fds_model::{Action, DEFAULT_WEIGHT, clamp_float, round_to};

use crate::changes::{ChangeKind, Rule, TransformReport, set_if_changed};
use crate::merge::{UpsertOutcome, upsert_action, upsert_action_before};

/// Decimal places kept for `penalty_severity`.
pub(crate) const SEVERITY_DECIMALS: i32 = 2;

/// Decimal places kept for `weight`.
pub(crate) const WEIGHT_DECIMALS: i32 = 3;

/// Writes made on behalf of one rule inside one jurisdiction.
///
/// Every helper compares before writing and records what it wrote.
pub(crate) struct Scope<'a> {
    rule: Rule,
    jurisdiction: &'a str,
    report: &'a mut TransformReport,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(rule: Rule, jurisdiction: &'a str, report: &'a mut TransformReport) -> Self {
        Self {
            rule,
            jurisdiction,
            report,
        }
    }

    fn field(&mut self, action: &str, field: &'static str) {
        self.report.record(
            self.rule,
            Some(self.jurisdiction),
            Some(action),
            ChangeKind::Field(field),
        );
    }

    pub(crate) fn set_weight(&mut self, action: &mut Action, weight: f64) {
        if set_if_changed(&mut action.weight, Some(weight)) {
            self.field(&action.name, "weight");
        }
    }

    /// Set `weight` only when the action has none.
    pub(crate) fn default_weight(&mut self, action: &mut Action) {
        if action.weight.is_none() {
            action.weight = Some(DEFAULT_WEIGHT);
            self.field(&action.name, "weight");
        }
    }

    pub(crate) fn set_source(&mut self, action: &mut Action, source: &str) {
        if action.source.as_deref() != Some(source) {
            action.source = Some(source.to_string());
            self.field(&action.name, "source");
        }
    }

    pub(crate) fn set_ceilings(&mut self, action: &mut Action, days_max: i64, permission_max: i64) {
        if set_if_changed(&mut action.days_max, Some(days_max)) {
            self.field(&action.name, "days_max");
        }
        if set_if_changed(&mut action.permission_max, Some(permission_max)) {
            self.field(&action.name, "permission_max");
        }
    }

    pub(crate) fn set_median_days(&mut self, action: &mut Action, days: i64) {
        if set_if_changed(&mut action.median_days, days) {
            self.field(&action.name, "median_days");
        }
    }

    /// Bring severity and weight to their canonical precision.
    pub(crate) fn normalize(&mut self, action: &mut Action) {
        let severity = round_to(action.penalty_severity, SEVERITY_DECIMALS);
        if set_if_changed(&mut action.penalty_severity, severity) {
            self.field(&action.name, "penalty_severity");
        }
        if let Some(weight) = action.weight {
            let rounded = round_to(weight, WEIGHT_DECIMALS);
            if set_if_changed(&mut action.weight, Some(rounded)) {
                self.field(&action.name, "weight");
            }
        }
    }

    /// Stamp a seed action with its fixed weight and source, then normalize it.
    pub(crate) fn stamp_seed(&mut self, action: &mut Action, source: &str) {
        self.set_weight(action, DEFAULT_WEIGHT);
        self.set_source(action, source);
        self.normalize(action);
    }

    pub(crate) fn upsert(&mut self, actions: &mut Vec<Action>, action: Action) {
        let name = action.name.clone();
        let outcome = upsert_action(actions, action);
        self.record_outcome(&name, outcome);
    }

    pub(crate) fn upsert_before(&mut self, actions: &mut Vec<Action>, action: Action, anchor: &str) {
        let name = action.name.clone();
        let outcome = upsert_action_before(actions, action, anchor);
        self.record_outcome(&name, outcome);
    }

    fn record_outcome(&mut self, name: &str, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted(index) => self.report.record(
                self.rule,
                Some(self.jurisdiction),
                Some(name),
                ChangeKind::Inserted { index },
            ),
            UpsertOutcome::Updated(fields) => {
                for field in fields {
                    self.field(name, field);
                }
            }
            UpsertOutcome::Unchanged => {}
        }
    }
}

/// Friction numbers read from a seed action.
///
/// Counts are widened to `f64` so derivations cannot overflow; `clamp_int`
/// brings the results back into range.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Seed {
    pub pc: f64,
    pub days: f64,
    pub sev: f64,
}

impl Seed {
    pub(crate) fn of(action: &Action) -> Self {
        Self {
            pc: action.permission_count as f64,
            days: action.median_days as f64,
            sev: action.penalty_severity,
        }
    }
}

/// Clamp a derived severity into `[min, 1]` and round it.
pub(crate) fn severity(value: f64, min: f64) -> f64 {
    round_to(clamp_float(value, min, 1.0), SEVERITY_DECIMALS)
}

/// A derived action with weight and source set.
pub(crate) fn derived(
    name: &str,
    permission_count: i64,
    median_days: i64,
    penalty_severity: f64,
    weight: f64,
    source: &str,
) -> Action {
    Action::new(name, permission_count, median_days, penalty_severity)
        .with_weight(weight)
        .with_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fds_model::DomainKey;

    #[test]
    fn normalize_rounds_severity_and_weight() {
        let mut report = TransformReport::default();
        let mut scope = Scope::new(Rule::Enrich(DomainKey::School), "Ohio", &mut report);
        let mut action = Action::new("Homeschool", 2, 6, 0.234_9).with_weight(0.812_34);

        scope.normalize(&mut action);
        assert_eq!(action.penalty_severity, 0.23);
        assert_eq!(action.weight, Some(0.812));

        scope.normalize(&mut action);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn default_weight_keeps_existing_weight() {
        let mut report = TransformReport::default();
        let mut scope = Scope::new(Rule::Enrich(DomainKey::HousingRent), "Ohio", &mut report);
        let mut weighted = Action::new("Rent", 1, 1, 0.1).with_weight(0.5);
        let mut bare = Action::new("Lease", 1, 1, 0.1);

        scope.default_weight(&mut weighted);
        scope.default_weight(&mut bare);

        assert_eq!(weighted.weight, Some(0.5));
        assert_eq!(bare.weight, Some(1.0));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn severity_clamps_then_rounds() {
        assert_eq!(severity(1.3, 0.1), 1.0);
        assert_eq!(severity(0.0, 0.1), 0.1);
        assert_eq!(severity(0.7 - 0.1, 0.1), 0.6);
        assert_eq!(severity(0.2 * 0.8, 0.05), 0.16);
    }
}
