//! CLI argument definitions for `fds`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fds_cli::pipeline::DEFAULT_DATASET_PATH;
use fds_ingest::{
    DEFAULT_SALES_TAX_CACHE_PATH, DEFAULT_SALES_TAX_EFFECTIVE_DATE, DEFAULT_SALES_TAX_TABLE_ID,
    DEFAULT_SALES_TAX_URL, RateSourceMode,
};
use fds_transform::{DEFAULT_HOUSING_BUY_DAYS_MAX, DEFAULT_HOUSING_BUY_PERMISSION_MAX};

#[derive(Parser)]
#[command(
    name = "fds",
    version,
    about = "Regulatory friction dataset updater and validator",
    long_about = "Maintain the per-state regulatory friction dataset.\n\n\
                  `update` syncs sales tax rates and applies the versioned enrichment rules.\n\
                  `validate` checks structural and numeric invariants."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sync sales tax rates and apply the enrichment rule set.
    Update(UpdateArgs),

    /// Check dataset invariants and print per-domain statistics.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct UpdateArgs {
    /// Dataset file to update.
    #[arg(long = "dataset", value_name = "PATH", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Write the updated dataset back to disk.
    #[arg(long = "write")]
    pub write: bool,

    /// Where to load sales tax rates from.
    #[arg(long = "sales-tax-source", value_enum, default_value = "auto")]
    pub sales_tax_source: RateSourceArg,

    /// Page holding the sales tax table.
    #[arg(long = "sales-tax-url", value_name = "URL", default_value = DEFAULT_SALES_TAX_URL)]
    pub sales_tax_url: String,

    /// `id` attribute of the sales tax table.
    #[arg(long = "sales-tax-table-id", value_name = "ID", default_value = DEFAULT_SALES_TAX_TABLE_ID)]
    pub sales_tax_table_id: String,

    /// Effective date recorded with the rates.
    #[arg(
        long = "sales-tax-effective-date",
        value_name = "DATE",
        default_value = DEFAULT_SALES_TAX_EFFECTIVE_DATE
    )]
    pub sales_tax_effective_date: String,

    /// Rate cache file.
    #[arg(
        long = "sales-tax-cache",
        value_name = "PATH",
        default_value = DEFAULT_SALES_TAX_CACHE_PATH
    )]
    pub sales_tax_cache: PathBuf,

    /// HTTP timeout for fetching the rate page.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// `days_max` ceiling written to every housing_buy action.
    #[arg(
        long = "housing-buy-days-max",
        value_name = "DAYS",
        default_value_t = DEFAULT_HOUSING_BUY_DAYS_MAX,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub housing_buy_days_max: i64,

    /// `permission_max` ceiling written to every housing_buy action.
    #[arg(
        long = "housing-buy-permission-max",
        value_name = "COUNT",
        default_value_t = DEFAULT_HOUSING_BUY_PERMISSION_MAX,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub housing_buy_permission_max: i64,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Dataset file to validate.
    #[arg(long = "dataset", value_name = "PATH", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RateSourceArg {
    /// Cache when it holds rates, otherwise fetch.
    Auto,
    /// Cache only; fail when missing or empty.
    Cache,
    /// Always fetch and rewrite the cache.
    Fetch,
}

impl From<RateSourceArg> for RateSourceMode {
    fn from(arg: RateSourceArg) -> Self {
        match arg {
            RateSourceArg::Auto => RateSourceMode::Auto,
            RateSourceArg::Cache => RateSourceMode::Cache,
            RateSourceArg::Fetch => RateSourceMode::Fetch,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
