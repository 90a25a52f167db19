//! Tests for cache / fetch / auto rate resolution.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use fds_ingest::{
    IngestError, RateOrigin, RateSourceConfig, RateSourceMode, Result, TableFetcher, read_cache,
    resolve_rates,
};
use tempfile::tempdir;

const PAGE: &str = r#"
<html><body>
<table id="tablepress-796">
  <thead><tr><th>State</th><th>State Tax Rate</th><th>Rank</th><th>Avg. Local Tax Rate</th><th>Max Local</th><th>Combined Rate</th><th>Combined Rank</th></tr></thead>
  <tbody>
    <tr><td>Alabama</td><td>4.00%</td><td>40</td><td>5.44%</td><td>7.50%</td><td>9.44%</td><td>5</td></tr>
    <tr><td>California (a)</td><td>7.25%</td><td>1</td><td>1.65%</td><td>5.25%</td><td>8.90%</td><td>7</td></tr>
    <tr><td>Tennessee</td><td>7.00%</td><td>2</td><td>2.556%</td><td>2.75%</td><td>9.556%</td><td>1</td></tr>
  </tbody>
</table>
</body></html>
"#;

struct CannedFetcher {
    body: &'static str,
    calls: Cell<usize>,
}

impl CannedFetcher {
    fn new(body: &'static str) -> Self {
        Self {
            body,
            calls: Cell::new(0),
        }
    }
}

impl TableFetcher for CannedFetcher {
    fn fetch(&self, _url: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.body.to_string())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date")
}

fn config(cache: &Path, mode: RateSourceMode) -> RateSourceConfig {
    RateSourceConfig::default()
        .with_cache_path(cache)
        .with_mode(mode)
}

fn write_cache_file(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
    fs::write(path, body).expect("write cache");
}

#[test]
fn cache_mode_reads_cache_without_fetching() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("sources/rates.json");
    write_cache_file(
        &cache,
        r#"{"source": {"name": "Tax Foundation", "retrieved_at": "2025-01-15"}, "rates": {"Ohio": 0.0724}}"#,
    );
    let fetcher = CannedFetcher::new(PAGE);

    let resolved = resolve_rates(&config(&cache, RateSourceMode::Cache), &fetcher, today())
        .expect("resolve");

    assert_eq!(resolved.origin, RateOrigin::Cache);
    assert_eq!(resolved.snapshot.rate("Ohio"), Some(0.0724));
    assert_eq!(resolved.snapshot.source.retrieved_at, "2025-01-15");
    assert_eq!(resolved.snapshot.source.table_id, "tablepress-796");
    assert_eq!(fetcher.calls.get(), 0);
}

#[test]
fn cache_without_retrieved_at_uses_today() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("rates.json");
    write_cache_file(&cache, r#"{"rates": {"Ohio": 0.0724}}"#);

    let resolved = resolve_rates(
        &config(&cache, RateSourceMode::Cache),
        &CannedFetcher::new(PAGE),
        today(),
    )
    .expect("resolve");

    assert_eq!(resolved.snapshot.source.retrieved_at, "2025-02-03");
}

#[test]
fn cache_mode_missing_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("absent.json");
    let fetcher = CannedFetcher::new(PAGE);

    let err = resolve_rates(&config(&cache, RateSourceMode::Cache), &fetcher, today())
        .expect_err("missing cache");

    assert!(matches!(err, IngestError::MissingCache { .. }));
    assert!(err.to_string().contains("absent.json"));
    assert_eq!(fetcher.calls.get(), 0);
}

#[test]
fn cache_mode_empty_rates_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("rates.json");
    write_cache_file(&cache, r#"{"source": {}, "rates": {}}"#);

    let err = resolve_rates(
        &config(&cache, RateSourceMode::Cache),
        &CannedFetcher::new(PAGE),
        today(),
    )
    .expect_err("empty cache");

    assert!(matches!(err, IngestError::EmptyCache { .. }));
}

#[test]
fn auto_mode_fetches_and_persists_when_cache_absent() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("sources/rates.json");
    let fetcher = CannedFetcher::new(PAGE);

    let resolved = resolve_rates(&config(&cache, RateSourceMode::Auto), &fetcher, today())
        .expect("resolve");

    assert_eq!(resolved.origin, RateOrigin::Fetched);
    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(resolved.snapshot.len(), 3);
    assert_eq!(resolved.snapshot.rate("California"), Some(0.089));
    assert_eq!(resolved.snapshot.rate("Tennessee"), Some(0.09556));
    assert_eq!(resolved.snapshot.source.retrieved_at, "2025-02-03");

    let cached = read_cache(&cache).expect("read").expect("cache written");
    assert_eq!(cached.source.name, "Tax Foundation");
    assert_eq!(cached.source.effective_date, "2025-01");
    assert_eq!(cached.rates, resolved.snapshot.rates);

    let text = fs::read_to_string(&cache).expect("read text");
    let alabama = text.find("\"Alabama\"").expect("Alabama");
    let tennessee = text.find("\"Tennessee\"").expect("Tennessee");
    assert!(alabama < tennessee);
    assert!(text.ends_with("}\n"));
}

#[test]
fn auto_mode_falls_through_on_empty_cache() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("rates.json");
    write_cache_file(&cache, r#"{"rates": {}}"#);
    let fetcher = CannedFetcher::new(PAGE);

    let resolved = resolve_rates(&config(&cache, RateSourceMode::Auto), &fetcher, today())
        .expect("resolve");

    assert_eq!(resolved.origin, RateOrigin::Fetched);
    assert_eq!(fetcher.calls.get(), 1);
}

#[test]
fn fetch_mode_ignores_existing_cache() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("rates.json");
    write_cache_file(&cache, r#"{"rates": {"Ohio": 0.0724}}"#);
    let fetcher = CannedFetcher::new(PAGE);

    let resolved = resolve_rates(&config(&cache, RateSourceMode::Fetch), &fetcher, today())
        .expect("resolve");

    assert_eq!(resolved.origin, RateOrigin::Fetched);
    assert_eq!(resolved.snapshot.rate("Ohio"), None);
    let cached = read_cache(&cache).expect("read").expect("cache");
    assert!(!cached.rates.contains_key("Ohio"));
}

#[test]
fn fetched_page_without_table_is_extraction_error() {
    let dir = tempdir().expect("tempdir");
    let cache = dir.path().join("rates.json");

    let err = resolve_rates(
        &config(&cache, RateSourceMode::Fetch),
        &CannedFetcher::new("<html><body><p>moved</p></body></html>"),
        today(),
    )
    .expect_err("no table");

    assert!(matches!(err, IngestError::Extraction { .. }));
    assert!(!cache.exists());
}
