//! Turn extracted table rows into a jurisdiction → rate mapping.
//!
//! Expected columns: 0 State, 1 State Rate, 2 Rank, 3 Avg Local,
//! 4 Max Local, 5 Combined Rate, 6 Combined Rank.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Column holding the combined state + average local rate.
pub const COMBINED_RATE_COLUMN: usize = 5;

/// Rows shorter than this are footnotes or malformed and are skipped.
pub const MIN_RATE_COLUMNS: usize = COMBINED_RATE_COLUMN + 1;

static TRAILING_FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("Invalid footnote regex"));

/// Strip a trailing footnote marker such as `"California (a)"`.
pub fn canonical_name(raw: &str) -> String {
    TRAILING_FOOTNOTE.replace(raw.trim(), "").into_owned()
}

/// Convert percent text (`"9.427%"`) to a decimal (`0.09427`).
pub fn parse_percent(text: &str) -> Result<f64> {
    let cleaned = text.trim().replace('%', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(IngestError::InvalidPercent {
            text: text.to_string(),
        });
    }
    cleaned
        .parse::<f64>()
        .map(|value| value / 100.0)
        .map_err(|_| IngestError::InvalidPercent {
            text: text.to_string(),
        })
}

/// Build the rate mapping from extracted rows.
///
/// Short rows and unparseable rates are skipped. An empty result means the
/// table id no longer matches the published page and is reported as
/// [`IngestError::Extraction`].
pub fn normalize_rates(rows: &[Vec<String>], table_id: &str) -> Result<BTreeMap<String, f64>> {
    let mut rates = BTreeMap::new();
    let mut skipped = 0usize;

    for row in rows {
        if row.len() < MIN_RATE_COLUMNS {
            skipped += 1;
            continue;
        }
        let name = canonical_name(&row[0]);
        match parse_percent(&row[COMBINED_RATE_COLUMN]) {
            Ok(rate) if rate.is_finite() && !name.is_empty() => {
                rates.insert(name, rate);
            }
            Ok(_) | Err(_) => {
                debug!(row = ?row, "skipping unusable rate row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(table_id, skipped, kept = rates.len(), "skipped rate rows");
    }
    if rates.is_empty() {
        return Err(IngestError::Extraction {
            table_id: table_id.to_string(),
        });
    }
    Ok(rates)
}
