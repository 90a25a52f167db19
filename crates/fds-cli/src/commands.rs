use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use fds_cli::pipeline::{self, UpdateOutcome, UpdateRequest};
use fds_ingest::{HttpFetcher, RateSourceConfig};
use fds_transform::TransformOptions;
use fds_validate::{ValidationSummary, validate_path};

use crate::cli::{UpdateArgs, ValidateArgs};

pub fn run_update(args: &UpdateArgs) -> Result<UpdateOutcome> {
    let today = Local::now().date_naive();
    let rates = RateSourceConfig::default()
        .with_mode(args.sales_tax_source.into())
        .with_url(&args.sales_tax_url)
        .with_table_id(&args.sales_tax_table_id)
        .with_effective_date(&args.sales_tax_effective_date)
        .with_cache_path(&args.sales_tax_cache)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let options = TransformOptions::new(today)
        .with_housing_buy_days_max(args.housing_buy_days_max)
        .with_housing_buy_permission_max(args.housing_buy_permission_max);

    let fetcher = HttpFetcher::new(&rates.user_agent, rates.timeout).context("build HTTP client")?;
    let request = UpdateRequest {
        dataset: args.dataset.clone(),
        write: args.write,
        rates,
        options,
    };
    pipeline::run_update(&request, &fetcher)
}

pub fn run_validate(args: &ValidateArgs) -> fds_validate::Result<ValidationSummary> {
    validate_path(&args.dataset)
}
