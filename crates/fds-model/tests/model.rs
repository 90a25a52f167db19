//! Tests for fds-model types.

use fds_model::{
    Action, Dataset, DomainKey, Jurisdiction, ModelError, load_dataset, save_dataset,
};
use serde_json::json;
use tempfile::tempdir;

fn sample_document() -> serde_json::Value {
    json!({
        "version": "2.4",
        "generated_at": "2025-01-02",
        "notes": "starter proxies",
        "sources": {"hslda": {"url": "https://hslda.org"}},
        "license": "CC-BY-4.0",
        "jurisdictions": [
            {
                "name": "Ohio",
                "abbr": "OH",
                "tax_proxies": {"sales_effective_rate": 0.0724, "income_top_rate": 0.035},
                "domains": {
                    "business": {
                        "actions": [
                            {"name": "Start LLC", "permission_count": 3, "median_days": 10, "penalty_severity": 0.42}
                        ],
                        "note": "kept"
                    }
                }
            }
        ]
    })
}

#[test]
fn dataset_round_trip_preserves_unknown_fields() {
    let text = serde_json::to_string(&sample_document()).unwrap();
    let dataset = Dataset::from_json_str(&text).unwrap();

    assert_eq!(dataset.version, "2.4");
    assert_eq!(dataset.jurisdictions.len(), 1);
    let ohio = dataset.jurisdiction("Ohio").unwrap();
    assert_eq!(ohio.tax_proxies["income_top_rate"], 0.035);
    assert_eq!(ohio.domain(DomainKey::Business).unwrap().actions.len(), 1);

    let value = serde_json::to_value(&dataset).unwrap();
    assert_eq!(value["license"], "CC-BY-4.0");
    assert_eq!(value["jurisdictions"][0]["abbr"], "OH");
    assert_eq!(value["jurisdictions"][0]["domains"]["business"]["note"], "kept");
}

#[test]
fn save_then_load_is_lossless() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dataset.json");

    let dataset = Dataset {
        version: "2.5".to_string(),
        generated_at: "2026-01-01".to_string(),
        notes: String::new(),
        sources: Default::default(),
        jurisdictions: vec![Jurisdiction::new("Texas").with_actions(
            DomainKey::Mobility,
            vec![
                Action::new("Vehicle reg", 3, 5, 0.45)
                    .with_weight(1.0)
                    .with_source("proxy: mobility compliance"),
            ],
        )],
        extra: Default::default(),
    };

    save_dataset(&dataset, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\"weight\": 1.0"));
    assert!(!text.contains("days_max"));

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded, dataset);
}

#[test]
fn action_count_spans_all_domains() {
    let jurisdiction = Jurisdiction::new("Utah")
        .with_actions(DomainKey::School, vec![Action::new("Homeschool", 2, 6, 0.2)])
        .with_actions(
            DomainKey::Speech,
            vec![
                Action::new("Assembly Permit", 2, 21, 0.56),
                Action::new("Sound amplification permit", 3, 13, 0.61),
            ],
        );
    let dataset = Dataset {
        version: String::new(),
        generated_at: String::new(),
        notes: String::new(),
        sources: Default::default(),
        jurisdictions: vec![jurisdiction],
        extra: Default::default(),
    };
    assert_eq!(dataset.action_count(), 3);
}

#[test]
fn action_missing_a_number_fails_load() {
    let mut document = sample_document();
    document["jurisdictions"][0]["domains"]["business"]["actions"][0]
        .as_object_mut()
        .unwrap()
        .remove("median_days");

    let error = Dataset::from_json_str(&document.to_string()).unwrap_err();

    assert!(matches!(error, ModelError::Structure { .. }), "{error:?}");
    assert!(error.to_string().contains("median_days"), "{error}");
}
