//! Rate source resolution: cached snapshot, live fetch, or both.
//!
//! The cache file is the audited input. `auto` prefers it and only fetches
//! when it is absent or holds no rates. An empty cache in `auto` mode is
//! treated like a missing one, which also hides a truncated cache; a warning
//! names the file when that happens.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use fds_model::{RateProvenance, RateSnapshot, read_json, round_to, write_json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::fetch::TableFetcher;
use crate::html::extract_table_rows;
use crate::normalize::normalize_rates;

/// Tax Foundation state sales tax page.
pub const DEFAULT_SALES_TAX_URL: &str = "https://taxfoundation.org/data/all/state/sales-tax-rates/";

/// 2025 Sales Tax Rates by State (January 2025).
pub const DEFAULT_SALES_TAX_TABLE_ID: &str = "tablepress-796";

pub const DEFAULT_SALES_TAX_EFFECTIVE_DATE: &str = "2025-01";

pub const DEFAULT_SALES_TAX_CACHE_PATH: &str = "sources/taxfoundation_sales_tax_rates_2025-01.json";

pub const SALES_TAX_SOURCE_NAME: &str = "Tax Foundation";

pub const DEFAULT_USER_AGENT: &str = "freedom-dataset-updater/1.0";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Decimal places kept for cached rates.
pub const RATE_DECIMALS: i32 = 5;

/// Where rates are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSourceMode {
    /// Cache when present and non-empty, otherwise fetch.
    #[default]
    Auto,
    /// Cache only; absent or empty cache is fatal.
    Cache,
    /// Always fetch and refresh the cache.
    Fetch,
}

impl RateSourceMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cache => "cache",
            Self::Fetch => "fetch",
        }
    }
}

impl fmt::Display for RateSourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateSourceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cache" => Ok(Self::Cache),
            "fetch" => Ok(Self::Fetch),
            _ => Err(format!("Unknown rate source: {s}")),
        }
    }
}

/// Settings for resolving the sales tax rate mapping.
#[derive(Debug, Clone)]
pub struct RateSourceConfig {
    pub mode: RateSourceMode,
    pub url: String,
    pub table_id: String,
    pub effective_date: String,
    pub cache_path: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            mode: RateSourceMode::default(),
            url: DEFAULT_SALES_TAX_URL.to_string(),
            table_id: DEFAULT_SALES_TAX_TABLE_ID.to_string(),
            effective_date: DEFAULT_SALES_TAX_EFFECTIVE_DATE.to_string(),
            cache_path: PathBuf::from(DEFAULT_SALES_TAX_CACHE_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl RateSourceConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: RateSourceMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = table_id.into();
        self
    }

    #[must_use]
    pub fn with_effective_date(mut self, effective_date: impl Into<String>) -> Self {
        self.effective_date = effective_date.into();
        self
    }

    #[must_use]
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn provenance(&self, retrieved_at: String) -> RateProvenance {
        RateProvenance {
            name: SALES_TAX_SOURCE_NAME.to_string(),
            url: self.url.clone(),
            table_id: self.table_id.clone(),
            effective_date: self.effective_date.clone(),
            retrieved_at,
        }
    }
}

/// How the returned rates were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    Cache,
    Fetched,
}

impl RateOrigin {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Fetched => "fetched",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedRates {
    pub snapshot: RateSnapshot,
    pub origin: RateOrigin,
}

/// On-disk cache layout; every part is optional when reading.
#[derive(Debug, Default, Deserialize)]
struct CacheFile {
    #[serde(default)]
    source: Option<RateProvenance>,
    #[serde(default)]
    rates: BTreeMap<String, f64>,
}

/// Read a cached snapshot. `Ok(None)` when the file does not exist.
pub fn read_cache(path: &Path) -> Result<Option<RateSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let cache: CacheFile = read_json(path)?;
    Ok(Some(RateSnapshot::new(
        cache.source.unwrap_or_default(),
        cache.rates,
    )))
}

/// Write a snapshot with sorted keys and rates rounded for diff stability.
pub fn write_cache(path: &Path, snapshot: &RateSnapshot) -> Result<()> {
    let rounded = RateSnapshot::new(snapshot.source.clone(), round_rates(&snapshot.rates));
    write_json(path, &rounded, "rate cache")?;
    Ok(())
}

fn round_rates(rates: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    rates
        .iter()
        .map(|(name, rate)| (name.clone(), round_to(*rate, RATE_DECIMALS)))
        .collect()
}

/// Resolve the rate mapping according to `config.mode`.
///
/// `today` stamps `retrieved_at` for fresh fetches and for caches that do not
/// record one.
pub fn resolve_rates(
    config: &RateSourceConfig,
    fetcher: &dyn TableFetcher,
    today: NaiveDate,
) -> Result<ResolvedRates> {
    let today = today.to_string();

    if config.mode != RateSourceMode::Fetch {
        match read_cache(&config.cache_path)? {
            Some(cached) if !cached.is_empty() => {
                let retrieved_at = Some(cached.source.retrieved_at.as_str())
                    .filter(|value| !value.is_empty())
                    .map_or_else(|| today.clone(), str::to_string);
                info!(
                    path = %config.cache_path.display(),
                    rates = cached.len(),
                    retrieved_at = %retrieved_at,
                    "loaded sales tax rates from cache"
                );
                return Ok(ResolvedRates {
                    snapshot: RateSnapshot::new(config.provenance(retrieved_at), cached.rates),
                    origin: RateOrigin::Cache,
                });
            }
            Some(_) if config.mode == RateSourceMode::Cache => {
                return Err(IngestError::EmptyCache {
                    path: config.cache_path.clone(),
                });
            }
            None if config.mode == RateSourceMode::Cache => {
                return Err(IngestError::MissingCache {
                    path: config.cache_path.clone(),
                });
            }
            Some(_) => warn!(
                path = %config.cache_path.display(),
                "rate cache is empty; fetching instead"
            ),
            None => info!(
                path = %config.cache_path.display(),
                "no rate cache; fetching"
            ),
        }
    }

    let html = fetcher.fetch(&config.url)?;
    let rows = extract_table_rows(&html, &config.table_id);
    let rates = round_rates(&normalize_rates(&rows, &config.table_id)?);
    let snapshot = RateSnapshot::new(config.provenance(today), rates);

    write_cache(&config.cache_path, &snapshot)?;
    info!(
        url = %config.url,
        table_id = %config.table_id,
        rates = snapshot.len(),
        cache = %config.cache_path.display(),
        "fetched sales tax rates"
    );

    Ok(ResolvedRates {
        snapshot,
        origin: RateOrigin::Fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!("auto".parse::<RateSourceMode>(), Ok(RateSourceMode::Auto));
        assert_eq!("CACHE".parse::<RateSourceMode>(), Ok(RateSourceMode::Cache));
        assert_eq!("fetch".parse::<RateSourceMode>(), Ok(RateSourceMode::Fetch));
        assert!("network".parse::<RateSourceMode>().is_err());
    }

    #[test]
    fn defaults_match_published_table() {
        let config = RateSourceConfig::default();
        assert_eq!(config.mode, RateSourceMode::Auto);
        assert_eq!(config.table_id, "tablepress-796");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.cache_path,
            PathBuf::from("sources/taxfoundation_sales_tax_rates_2025-01.json")
        );
    }

    #[test]
    fn rounds_cached_rates() {
        let mut rates = BTreeMap::new();
        rates.insert("Ohio".to_string(), 0.072_449_9);
        let rounded = round_rates(&rates);
        assert_eq!(rounded["Ohio"], 0.07245);
    }
}
