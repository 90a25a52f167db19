//! Sales tax rate ingestion for the friction dataset.
//!
//! - **html**: tolerant tokenizer and single-table row extraction
//! - **normalize**: rows → canonical jurisdiction name → decimal rate
//! - **fetch**: the [`TableFetcher`] seam and its blocking HTTP implementation
//! - **source**: cache / fetch / auto resolution with cache persistence
//!
//! # Example
//!
//! ```no_run
//! use fds_ingest::{HttpFetcher, RateSourceConfig, resolve_rates};
//!
//! fn rates() -> fds_ingest::Result<()> {
//!     let config = RateSourceConfig::default();
//!     let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
//!     let today = chrono::Local::now().date_naive();
//!     let resolved = resolve_rates(&config, &fetcher, today)?;
//!     println!("{} rates ({})", resolved.snapshot.len(), resolved.origin.label());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fetch;
pub mod html;
pub mod normalize;
pub mod source;

pub use error::{IngestError, Result};
pub use fetch::{HttpFetcher, TableFetcher};
pub use html::{TableExtractor, extract_table_rows, normalize_cell_text};
pub use normalize::{canonical_name, normalize_rates, parse_percent};
pub use source::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_SALES_TAX_CACHE_PATH, DEFAULT_SALES_TAX_EFFECTIVE_DATE,
    DEFAULT_SALES_TAX_TABLE_ID, DEFAULT_SALES_TAX_URL, DEFAULT_USER_AGENT, RateOrigin,
    RateSourceConfig, RateSourceMode, ResolvedRates, read_cache, resolve_rates, write_cache,
};
