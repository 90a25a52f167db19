//! speech: amplification and signage rules adjacent to assembly permits.

use fds_model::{Action, clamp_int};

use super::common::{Scope, Seed, derived, severity};

const SEED: &str = "Assembly Permit";
const SOURCE: &str = "proxy: civic regulation";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>) {
    let Some(assembly) = actions.iter_mut().find(|a| a.name == SEED) else {
        return;
    };
    scope.stamp_seed(assembly, SOURCE);
    let Seed { pc, days, sev } = Seed::of(assembly);

    let sound = derived(
        "Sound amplification permit",
        clamp_int(pc + 1.0, 1, 8),
        clamp_int(days * 0.6, 0, 30),
        severity(sev + 0.05, 0.1),
        0.6,
        SOURCE,
    );
    let signage = derived(
        "Signage / leafleting restrictions",
        clamp_int((pc - 1.0).max(1.0), 1, 6),
        0,
        severity(sev * 0.9, 0.1),
        0.4,
        SOURCE,
    );

    scope.upsert(actions, sound);
    scope.upsert(actions, signage);
}
