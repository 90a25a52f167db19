//! school: the homeschool seed split into reporting and assessment burdens.

use fds_model::{Action, clamp_int};

use super::common::{Scope, Seed, derived, severity};

const SEED: &str = "Homeschool";
const SOURCE: &str = "proxy: HSLDA tier";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>) {
    let Some(homeschool) = actions.iter_mut().find(|a| a.name == SEED) else {
        return;
    };
    scope.stamp_seed(homeschool, SOURCE);
    let Seed { pc, days, sev } = Seed::of(homeschool);

    let reporting = derived(
        "Homeschool notice / reporting",
        clamp_int((pc - 1.0).max(1.0), 1, 6),
        clamp_int(days * 0.5, 0, 30),
        severity(sev * 0.8, 0.05),
        0.8,
        SOURCE,
    );
    let assessment = derived(
        "Homeschool assessment / testing",
        clamp_int(pc + 1.0, 1, 8),
        clamp_int(days * 0.8 + 2.0, 0, 45),
        severity(sev + 0.1, 0.05),
        0.7,
        SOURCE,
    );

    scope.upsert(actions, reporting);
    scope.upsert(actions, assessment);
}
