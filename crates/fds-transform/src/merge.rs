//! Merge primitives for derived actions.
//!
//! An action is matched by exact name. A match is updated field by field,
//! writing only what differs; unset optional fields on the incoming action
//! leave the existing values alone. No match means insertion, either at the
//! end or in front of a named anchor.

use fds_model::Action;

use crate::changes::set_if_changed;

/// What a merge did to the action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Added at this index.
    Inserted(usize),
    /// Existing action updated; names the fields that differed.
    Updated(Vec<&'static str>),
    Unchanged,
}

impl UpsertOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Update the same-named action in place, or append.
pub fn upsert_action(actions: &mut Vec<Action>, action: Action) -> UpsertOutcome {
    let index = actions.len();
    insert_at_or_update(actions, action, index)
}

/// Update the same-named action in place, or insert immediately before
/// `anchor` (appending when the anchor is absent).
pub fn upsert_action_before(
    actions: &mut Vec<Action>,
    action: Action,
    anchor: &str,
) -> UpsertOutcome {
    let index = actions
        .iter()
        .position(|a| a.name == anchor)
        .unwrap_or(actions.len());
    insert_at_or_update(actions, action, index)
}

fn insert_at_or_update(actions: &mut Vec<Action>, action: Action, index: usize) -> UpsertOutcome {
    match actions.iter_mut().find(|a| a.name == action.name) {
        Some(existing) => {
            let fields = merge_fields(existing, action);
            if fields.is_empty() {
                UpsertOutcome::Unchanged
            } else {
                UpsertOutcome::Updated(fields)
            }
        }
        None => {
            actions.insert(index, action);
            UpsertOutcome::Inserted(index)
        }
    }
}

fn merge_fields(existing: &mut Action, incoming: Action) -> Vec<&'static str> {
    let mut fields = Vec::new();

    if set_if_changed(&mut existing.permission_count, incoming.permission_count) {
        fields.push("permission_count");
    }
    if set_if_changed(&mut existing.median_days, incoming.median_days) {
        fields.push("median_days");
    }
    if set_if_changed(&mut existing.penalty_severity, incoming.penalty_severity) {
        fields.push("penalty_severity");
    }
    if incoming.weight.is_some() && set_if_changed(&mut existing.weight, incoming.weight) {
        fields.push("weight");
    }
    if incoming.days_max.is_some() && set_if_changed(&mut existing.days_max, incoming.days_max) {
        fields.push("days_max");
    }
    if incoming.permission_max.is_some()
        && set_if_changed(&mut existing.permission_max, incoming.permission_max)
    {
        fields.push("permission_max");
    }
    if incoming.source.is_some() && set_if_changed(&mut existing.source, incoming.source) {
        fields.push("source");
    }
    for (key, value) in incoming.extra {
        if existing.extra.get(&key) != Some(&value) {
            existing.extra.insert(key, value);
            fields.push("extra");
        }
    }

    fields
}
