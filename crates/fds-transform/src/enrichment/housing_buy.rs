//! housing_buy: rescaled normalization ceilings and the derived remodel permit.
//!
//! Every action is rewritten to the configured `days_max`/`permission_max` so
//! long approval queues are not clipped at a stale ceiling. When the ADU seed
//! exists, "Major remodel permit" goes directly in front of "Zoning variance"
//! (or at the end without it).

use fds_model::{Action, DEFAULT_WEIGHT, clamp_int};

use super::common::{Scope, Seed, derived, severity};
use crate::options::TransformOptions;

const SOURCE: &str = "proxy: land-use friction";

const ADU: &str = "Build ADU / Expand";
const ZONING_VARIANCE: &str = "Zoning variance";
const MAJOR_REMODEL: &str = "Major remodel permit";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>, options: &TransformOptions) {
    let days_max = options.housing_buy_days_max;
    let permission_max = options.housing_buy_permission_max;

    for action in actions.iter_mut() {
        scope.set_ceilings(action, days_max, permission_max);
        let weight = match action.name.as_str() {
            ADU => 1.2,
            ZONING_VARIANCE => 0.8,
            _ => action.weight.unwrap_or(DEFAULT_WEIGHT),
        };
        scope.set_weight(action, weight);
        scope.set_source(action, SOURCE);
        scope.normalize(action);
    }

    let Some(adu) = actions.iter().find(|a| a.name == ADU).map(Seed::of) else {
        return;
    };
    let remodel = remodel_permit(adu, days_max, permission_max);
    scope.upsert_before(actions, remodel, ZONING_VARIANCE);
}

/// Remodel permit derived from the ADU seed.
fn remodel_permit(adu: Seed, days_max: i64, permission_max: i64) -> Action {
    derived(
        MAJOR_REMODEL,
        clamp_int(adu.pc * 0.75, 3, 10),
        clamp_int(adu.days * 0.6, 30, days_max),
        severity(adu.sev - 0.1, 0.1),
        DEFAULT_WEIGHT,
        SOURCE,
    )
    .with_ceilings(days_max, permission_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_remodel_from_adu() {
        let adu = Seed {
            pc: 6.0,
            days: 150.0,
            sev: 0.7,
        };
        let remodel = remodel_permit(adu, 420, 12);
        assert_eq!(remodel.permission_count, 5);
        assert_eq!(remodel.median_days, 90);
        assert_eq!(remodel.penalty_severity, 0.6);
        assert_eq!(remodel.days_max, Some(420));
        assert_eq!(remodel.permission_max, Some(12));
        assert_eq!(remodel.weight, Some(1.0));
    }

    #[test]
    fn remodel_days_respect_ceiling() {
        let adu = Seed {
            pc: 20.0,
            days: 900.0,
            sev: 0.05,
        };
        let remodel = remodel_permit(adu, 420, 12);
        assert_eq!(remodel.permission_count, 10);
        assert_eq!(remodel.median_days, 420);
        assert_eq!(remodel.penalty_severity, 0.1);
    }
}
