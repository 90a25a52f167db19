//! mobility: inspections and traffic penalties alongside vehicle registration.

use fds_model::{Action, clamp_int};

use super::common::{Scope, Seed, derived, severity};

const SEED: &str = "Vehicle reg";
const SOURCE: &str = "proxy: mobility compliance";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>) {
    let Some(vehicle) = actions.iter_mut().find(|a| a.name == SEED) else {
        return;
    };
    scope.stamp_seed(vehicle, SOURCE);
    let Seed { pc, sev, .. } = Seed::of(vehicle);

    let inspection = derived(
        "Inspection / emissions compliance",
        clamp_int(pc, 1, 10),
        clamp_int(((pc - 2.0) * 7.0).max(0.0), 0, 60),
        severity(sev + 0.05, 0.1),
        0.8,
        SOURCE,
    );
    let traffic = derived(
        "Traffic enforcement penalties",
        1,
        0,
        severity(sev + 0.1, 0.1),
        0.5,
        SOURCE,
    );

    scope.upsert(actions, inspection);
    scope.upsert(actions, traffic);
}
