//! Rendering of update and validation summaries.

use std::collections::BTreeMap;

use fds_cli::summary::{change_table, finding_lines, validation_line, validation_table};
use fds_model::DomainKey;
use fds_transform::{Change, ChangeKind, Rule, TransformReport};
use fds_validate::{Finding, Issue, Tally, ValidationError, ValidationSummary};

fn change(rule: Rule, kind: ChangeKind) -> Change {
    Change {
        rule,
        jurisdiction: Some("Ohio".to_string()),
        action: None,
        kind,
    }
}

fn finding(index: usize) -> Finding {
    Finding {
        jurisdiction: "Ohio".to_string(),
        domain: DomainKey::School,
        action: Some(format!("Action {index}")),
        issue: Issue::MissingField {
            field: "median_days",
        },
    }
}

#[test]
fn change_table_counts_per_rule() {
    let report = TransformReport {
        changes: vec![
            change(Rule::TaxSync, ChangeKind::Field("sales_effective_rate")),
            change(
                Rule::Enrich(DomainKey::HousingBuy),
                ChangeKind::Inserted { index: 1 },
            ),
            change(Rule::Enrich(DomainKey::HousingBuy), ChangeKind::Field("days_max")),
            change(Rule::Metadata, ChangeKind::Field("version")),
        ],
        jurisdictions: 1,
    };

    let rendered = change_table(&report).to_string();

    for label in ["Rule", "tax_sync", "enrich:housing_buy", "metadata", "TOTAL"] {
        assert!(rendered.contains(label), "missing {label}:\n{rendered}");
    }
    let rows: Vec<_> = rendered.lines().filter(|l| l.contains("enrich:")).collect();
    assert_eq!(rows.len(), 1);
}

#[test]
fn finding_preview_is_capped() {
    let error = ValidationError::Findings {
        findings: (0..32).map(finding).collect(),
    };

    let lines = finding_lines(&error);

    assert_eq!(lines.len(), 31);
    insta::assert_snapshot!(&lines[0], @"BAD: Ohio / school / Action 0: missing median_days");
    insta::assert_snapshot!(&lines[30], @"... 2 more not shown");
}

#[test]
fn fatal_errors_have_no_finding_lines() {
    let error = ValidationError::Fatal {
        message: "dataset.version must be a string".to_string(),
    };
    assert!(finding_lines(&error).is_empty());
}

#[test]
fn validation_summary_lists_every_domain() {
    let mut housing_buy = Tally::default();
    housing_buy.add(420);
    housing_buy.add(420);
    housing_buy.add(180);
    let summary = ValidationSummary {
        version: "2.5".to_string(),
        jurisdictions: 2,
        actions_per_domain: BTreeMap::from([(DomainKey::HousingBuy, 3), (DomainKey::School, 4)]),
        days_max: BTreeMap::from([(DomainKey::HousingBuy, housing_buy)]),
    };

    insta::assert_snapshot!(validation_line(&summary), @"OK: dataset version=2.5 jurisdictions=2");

    let rendered = validation_table(&summary).to_string();
    for key in DomainKey::REQUIRED {
        assert!(rendered.contains(key.as_str()), "missing {key}:\n{rendered}");
    }
    assert!(rendered.contains("420 (2), 180 (1)"));
    let total = rendered.lines().find(|l| l.contains("TOTAL")).unwrap();
    assert!(total.contains('7'));
}
