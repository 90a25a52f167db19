//! The update pipeline: load, resolve rates, transform, persist.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fds_ingest::{RateOrigin, RateSourceConfig, TableFetcher, resolve_rates};
use fds_model::{load_dataset, save_dataset};
use fds_transform::{TransformOptions, TransformReport, apply_transforms};
use tracing::{info, info_span};

/// Dataset location used when none is given.
pub const DEFAULT_DATASET_PATH: &str = "full_states_dataset.json";

/// Everything one update run needs.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub dataset: PathBuf,
    /// Persist the result; otherwise the run is a dry run.
    pub write: bool,
    pub rates: RateSourceConfig,
    pub options: TransformOptions,
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub dataset: PathBuf,
    pub report: TransformReport,
    pub origin: RateOrigin,
    pub rate_count: usize,
    pub written: bool,
}

/// Run one update.
///
/// The dataset file is only touched when `request.write` is set and every
/// earlier stage succeeded. It is written even when the transform reported
/// no changes.
pub fn run_update(request: &UpdateRequest, fetcher: &dyn TableFetcher) -> Result<UpdateOutcome> {
    let span = info_span!("update", dataset = %request.dataset.display());
    let _guard = span.enter();

    let mut dataset = load_dataset(&request.dataset)
        .with_context(|| format!("load dataset {}", request.dataset.display()))?;
    info!(
        jurisdictions = dataset.jurisdictions.len(),
        actions = dataset.action_count(),
        "loaded dataset"
    );

    let resolved = resolve_rates(&request.rates, fetcher, request.options.today)
        .context("resolve sales tax rates")?;

    let report = apply_transforms(&mut dataset, &resolved.snapshot, &request.options)
        .context("apply transforms")?;

    if request.write {
        save_dataset(&dataset, &request.dataset)
            .with_context(|| format!("write dataset {}", request.dataset.display()))?;
        info!(path = %request.dataset.display(), "wrote dataset");
    }

    Ok(UpdateOutcome {
        dataset: request.dataset.clone(),
        report,
        origin: resolved.origin,
        rate_count: resolved.snapshot.len(),
        written: request.write,
    })
}
