//! Per-domain enrichment rules.
//!
//! Each required domain has one enricher with the same shape: find a seed
//! action by exact name, stamp it with a fixed weight and source, normalize
//! its numbers, then upsert satellite actions computed from the seed's
//! friction numbers. housing_rent and housing_buy stamp every action instead
//! of a single seed.
//!
//! | Domain | Seed | Satellites |
//! |--------|------|------------|
//! | housing_rent | (all actions) | none |
//! | housing_buy | Build ADU / Expand | Major remodel permit |
//! | business | Start LLC | Hire first employee, Contractor vs employee classification |
//! | school | Homeschool | Homeschool notice / reporting, Homeschool assessment / testing |
//! | speech | Assembly Permit | Sound amplification permit, Signage / leafleting restrictions |
//! | privacy | Data compliance | Consumer data requests, Breach notification / penalties |
//! | mobility | Vehicle reg | Inspection / emissions compliance, Traffic enforcement penalties |

mod business;
pub(crate) mod common;
mod housing_buy;
mod housing_rent;
mod mobility;
mod privacy;
mod school;
mod speech;

use fds_model::{Action, DomainKey};

use crate::options::TransformOptions;
use common::Scope;

/// Run the enricher for `key` over one domain's action list.
pub(crate) fn enrich_domain(
    key: DomainKey,
    actions: &mut Vec<Action>,
    scope: &mut Scope<'_>,
    options: &TransformOptions,
) {
    match key {
        DomainKey::HousingRent => housing_rent::enrich(actions, scope),
        DomainKey::HousingBuy => housing_buy::enrich(actions, scope, options),
        DomainKey::Business => business::enrich(actions, scope),
        DomainKey::School => school::enrich(actions, scope),
        DomainKey::Speech => speech::enrich(actions, scope),
        DomainKey::Privacy => privacy::enrich(actions, scope),
        DomainKey::Mobility => mobility::enrich(actions, scope),
    }
}
