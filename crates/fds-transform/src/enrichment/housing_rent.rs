//! housing_rent: weights and provenance on the existing actions.

use fds_model::Action;

use super::common::Scope;

const SOURCE: &str = "proxy: housing/rent regulation";

pub(super) fn enrich(actions: &mut [Action], scope: &mut Scope<'_>) {
    for action in actions {
        match action.name.as_str() {
            "Short-term rental permit" => scope.set_weight(action, 0.8),
            "Eviction/Lease flexibility" => scope.set_weight(action, 1.2),
            _ => scope.default_weight(action),
        }
        scope.set_source(action, SOURCE);
        scope.normalize(action);
    }
}
