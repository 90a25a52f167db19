//! External rate snapshots and their provenance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a rate mapping came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateProvenance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub table_id: String,
    #[serde(default)]
    pub effective_date: String,
    #[serde(default)]
    pub retrieved_at: String,
}

/// Provenance record stamped into `Dataset::sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub url: String,
    pub table_id: String,
    pub effective_date: String,
    pub retrieved_at: String,
}

/// Rate mapping keyed by canonical jurisdiction name, with provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub source: RateProvenance,
    /// Decimal rates in `[0, 1)`.
    pub rates: BTreeMap<String, f64>,
}

impl RateProvenance {
    pub fn source_record(&self) -> SourceRecord {
        SourceRecord {
            url: self.url.clone(),
            table_id: self.table_id.clone(),
            effective_date: self.effective_date.clone(),
            retrieved_at: self.retrieved_at.clone(),
        }
    }
}

impl RateSnapshot {
    pub fn new(source: RateProvenance, rates: BTreeMap<String, f64>) -> Self {
        Self { source, rates }
    }

    pub fn rate(&self, jurisdiction: &str) -> Option<f64> {
        self.rates.get(jurisdiction).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
