//! The versioned rule set applied to a whole dataset.
//!
//! Rules run per jurisdiction in dataset order: tax sync, then the seven
//! domain enrichers in canonical domain order, then the root metadata stamp.
//! Preconditions (names present, rate coverage for every jurisdiction) are
//! checked for the whole dataset before the first write, so a failing run
//! leaves the dataset untouched.

use std::collections::HashSet;

use fds_model::{Dataset, DomainKey, RateSnapshot, round_to};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::changes::{ChangeKind, Rule, TransformReport, set_if_changed};
use crate::enrichment::common::Scope;
use crate::enrichment::enrich_domain;
use crate::error::{Result, TransformError};
use crate::options::TransformOptions;

/// Version string stamped by this rule set.
pub const RULESET_VERSION: &str = "2.5";

/// `notes` text stamped by this rule set.
pub const RULESET_NOTES: &str = "v2.5: rescaled housing_buy time normalization, expanded action library with weights, and updated sales_effective_rate from Tax Foundation combined state+avg local rates (January 2025).";

/// Key of the synced rate in `tax_proxies`.
pub const SALES_EFFECTIVE_RATE: &str = "sales_effective_rate";

/// Key of the rate provenance record in `sources`.
pub const SALES_TAX_SOURCE_KEY: &str = "taxfoundation_sales_tax_rates";

/// Decimal places kept for synced rates.
pub const RATE_DECIMALS: i32 = 5;

/// Apply the rule set in place and report every write.
///
/// Running this twice with the same inputs yields an empty report the
/// second time.
///
/// # Errors
///
/// [`TransformError::Structure`] for an unnamed or duplicated jurisdiction,
/// [`TransformError::MissingRate`] for the first jurisdiction without a rate.
/// Either way nothing has been modified.
pub fn apply_transforms(
    dataset: &mut Dataset,
    rates: &RateSnapshot,
    options: &TransformOptions,
) -> Result<TransformReport> {
    preflight(dataset, rates)?;

    let mut report = TransformReport {
        jurisdictions: dataset.jurisdictions.len(),
        ..TransformReport::default()
    };

    for jurisdiction in &mut dataset.jurisdictions {
        let name = jurisdiction.name.as_str();
        let before = report.len();

        // Presence checked in preflight.
        if let Some(rate) = rates.rate(name) {
            let rate = round_to(rate, RATE_DECIMALS);
            let current = jurisdiction.tax_proxies.get(SALES_EFFECTIVE_RATE).copied();
            if current != Some(rate) {
                jurisdiction
                    .tax_proxies
                    .insert(SALES_EFFECTIVE_RATE.to_string(), rate);
                report.record(
                    Rule::TaxSync,
                    Some(name),
                    None,
                    ChangeKind::Field(SALES_EFFECTIVE_RATE),
                );
            }
        }

        for key in DomainKey::REQUIRED {
            let Some(domain) = jurisdiction.domains.get_mut(key.as_str()) else {
                debug!(jurisdiction = name, domain = %key, "domain absent; skipping");
                continue;
            };
            let mut scope = Scope::new(Rule::Enrich(key), name, &mut report);
            enrich_domain(key, &mut domain.actions, &mut scope, options);
        }

        debug!(
            jurisdiction = name,
            changes = report.len() - before,
            "transformed jurisdiction"
        );
    }

    stamp_metadata(dataset, rates, options, &mut report);

    info!(
        jurisdictions = report.jurisdictions,
        changes = report.len(),
        inserted = report.insertions(),
        "applied rule set {RULESET_VERSION}"
    );
    Ok(report)
}

fn preflight(dataset: &Dataset, rates: &RateSnapshot) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, jurisdiction) in dataset.jurisdictions.iter().enumerate() {
        let name = jurisdiction.name.trim();
        if name.is_empty() {
            return Err(TransformError::structure(format!(
                "jurisdiction at index {index} is missing a name"
            )));
        }
        if !seen.insert(name) {
            return Err(TransformError::structure(format!(
                "duplicate jurisdiction name: {name}"
            )));
        }
    }

    if let Some(missing) = dataset
        .jurisdictions
        .iter()
        .find(|j| rates.rate(&j.name).is_none())
    {
        return Err(TransformError::MissingRate {
            jurisdiction: missing.name.clone(),
        });
    }
    Ok(())
}

fn stamp_metadata(
    dataset: &mut Dataset,
    rates: &RateSnapshot,
    options: &TransformOptions,
    report: &mut TransformReport,
) {
    fn field(report: &mut TransformReport, name: &'static str) {
        report.record(Rule::Metadata, None, None, ChangeKind::Field(name));
    }

    if set_if_changed(&mut dataset.notes, RULESET_NOTES.to_string()) {
        field(report, "notes");
    }
    if set_if_changed(&mut dataset.generated_at, options.today.to_string()) {
        field(report, "generated_at");
    }
    if set_if_changed(&mut dataset.version, RULESET_VERSION.to_string()) {
        field(report, "version");
    }

    let record = source_record(rates);
    if dataset.sources.get(SALES_TAX_SOURCE_KEY) != Some(&record) {
        dataset
            .sources
            .insert(SALES_TAX_SOURCE_KEY.to_string(), record);
        field(report, "sources");
    }
}

/// Provenance record written under `sources.taxfoundation_sales_tax_rates`.
pub fn source_record(rates: &RateSnapshot) -> Value {
    let record = rates.source.source_record();
    json!({
        "url": record.url,
        "table_id": record.table_id,
        "effective_date": record.effective_date,
        "retrieved_at": record.retrieved_at,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use fds_model::{Jurisdiction, RateProvenance};

    use super::*;

    fn rates(entries: &[(&str, f64)]) -> RateSnapshot {
        let rates: BTreeMap<_, _> = entries
            .iter()
            .map(|(name, rate)| ((*name).to_string(), *rate))
            .collect();
        RateSnapshot::new(RateProvenance::default(), rates)
    }

    fn dataset(names: &[&str]) -> Dataset {
        let mut dataset = Dataset::from_json_str(r#"{"jurisdictions": []}"#).unwrap();
        dataset.jurisdictions = names.iter().map(|n| Jurisdiction::new(*n)).collect();
        dataset
    }

    fn options() -> TransformOptions {
        TransformOptions::new(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
    }

    #[test]
    fn unnamed_jurisdiction_is_structural() {
        let mut data = dataset(&["Ohio", " "]);
        let err = apply_transforms(&mut data, &rates(&[("Ohio", 0.07)]), &options()).unwrap_err();
        assert!(matches!(err, TransformError::Structure { .. }));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn duplicate_jurisdiction_is_structural() {
        let mut data = dataset(&["Ohio", "Ohio"]);
        let err = apply_transforms(&mut data, &rates(&[("Ohio", 0.07)]), &options()).unwrap_err();
        assert!(matches!(err, TransformError::Structure { .. }));
    }

    #[test]
    fn syncs_rounded_rate() {
        let mut data = dataset(&["Ohio"]);
        apply_transforms(&mut data, &rates(&[("Ohio", 0.072_449_9)]), &options()).unwrap();
        assert_eq!(data.jurisdictions[0].tax_proxies[SALES_EFFECTIVE_RATE], 0.07245);
    }

    #[test]
    fn stamps_metadata_once() {
        let mut data = dataset(&["Ohio"]);
        let snapshot = rates(&[("Ohio", 0.07)]);

        let first = apply_transforms(&mut data, &snapshot, &options()).unwrap();
        let metadata = first.counts_by_rule()[&Rule::Metadata];
        assert_eq!(metadata, 4);
        assert_eq!(data.version, "2.5");
        assert_eq!(data.generated_at, "2025-02-03");
        assert!(data.sources.contains_key(SALES_TAX_SOURCE_KEY));

        let second = apply_transforms(&mut data, &snapshot, &options()).unwrap();
        assert!(!second.is_dirty());
    }
}
