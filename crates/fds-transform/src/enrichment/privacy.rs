//! privacy: compliance lead time and the obligations that follow from it.
//!
//! The seed's permission count doubles as a lead-time proxy, so its
//! `median_days` is rewritten from it. Satellites read the normalized seed;
//! reading the unrounded severity would make a second run drift.

use fds_model::{Action, clamp_int};

use super::common::{Scope, Seed, derived, severity};

const SEED: &str = "Data compliance";
const SOURCE: &str = "proxy: privacy compliance";

pub(super) fn enrich(actions: &mut Vec<Action>, scope: &mut Scope<'_>) {
    let Some(data) = actions.iter_mut().find(|a| a.name == SEED) else {
        return;
    };
    scope.set_weight(data, 1.0);
    scope.set_source(data, SOURCE);

    let pc = data.permission_count as f64;
    scope.set_median_days(data, clamp_int((pc * 10.0).max(10.0), 0, 180));
    scope.normalize(data);
    let Seed { sev, .. } = Seed::of(data);

    let requests = derived(
        "Consumer data requests",
        clamp_int(pc, 1, 10),
        clamp_int(30.0 + pc * 5.0, 0, 180),
        severity(sev * 0.9, 0.1),
        0.8,
        SOURCE,
    );
    let breach = derived(
        "Breach notification / penalties",
        clamp_int((pc - 1.0).max(1.0), 1, 10),
        clamp_int(10.0 + pc * 2.0, 0, 90),
        severity(sev + 0.05, 0.1),
        0.6,
        SOURCE,
    );

    scope.upsert(actions, requests);
    scope.upsert(actions, breach);
}
