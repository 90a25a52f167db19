//! business: hiring and worker-classification burdens derived from LLC formation.

use fds_model::{Action, clamp_int};

use super::common::{Scope, Seed, derived, severity};

const SEED: &str = "Start LLC";
const SEED_SOURCE: &str = "proxy: business compliance";
const LABOR_SOURCE: &str = "proxy: labor/compliance";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>) {
    let Some(llc) = actions.iter_mut().find(|a| a.name == SEED) else {
        return;
    };
    scope.stamp_seed(llc, SEED_SOURCE);
    let Seed { pc, days, sev } = Seed::of(llc);

    let hire = derived(
        "Hire first employee",
        clamp_int(pc + 2.0, 1, 10),
        clamp_int(days + 7.0, 0, 60),
        severity(sev + 0.08, 0.1),
        1.0,
        LABOR_SOURCE,
    );
    let contractor = derived(
        "Contractor vs employee classification",
        clamp_int((pc - 1.0).max(1.0), 1, 10),
        clamp_int(days * 0.3, 0, 30),
        severity(sev + 0.12, 0.1),
        0.8,
        LABOR_SOURCE,
    );

    scope.upsert(actions, hire);
    scope.upsert(actions, contractor);
}
