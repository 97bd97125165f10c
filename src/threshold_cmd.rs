//! Threshold command: estimate per-cell baseline thresholds.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, info_span};

use heatrisk_grid::DailyField;
use heatrisk_io::{read_daily_csv, write_thresholds};
use heatrisk_threshold::{ThresholdGrid, estimate_thresholds};

use crate::cli::ThresholdArgs;
use crate::config::HeatriskConfig;
use crate::convert;

/// Run the threshold stage on its own.
pub fn run(args: ThresholdArgs) -> Result<()> {
    let _cmd = info_span!("threshold").entered();
    let mut config = HeatriskConfig::load_or_default(args.config.as_deref())?;

    // CLI overrides config file values
    if !args.baselines.is_empty() {
        config.io.baseline = args.baselines;
    }
    if let Some(p) = args.percentile {
        config.threshold.percentile = p;
    }
    if let Some(n) = args.min_valid_days {
        config.threshold.min_valid_days = n;
    }
    if let Some(policy) = args.on_insufficient {
        config.threshold.on_insufficient = policy;
    }

    let thresholds = estimate(&config)?;
    write_thresholds(&args.output, &thresholds, &config.io.threshold_column)
        .with_context(|| format!("failed to write thresholds: {}", args.output.display()))?;
    info!(path = %args.output.display(), "thresholds written");
    Ok(())
}

/// Read the baseline tables and estimate thresholds.
pub fn estimate(config: &HeatriskConfig) -> Result<ThresholdGrid> {
    if config.io.baseline.is_empty() {
        bail!("no baseline tables: set [io].baseline in config or pass --baseline");
    }
    let reader_cfg = convert::build_reader_config(&config.io);
    let threshold_cfg = convert::build_threshold_config(&config.threshold, &config.io)?;

    let datasets: Vec<DailyField> = config
        .io
        .baseline
        .par_iter()
        .map(|path| {
            read_daily_csv(path, &reader_cfg)
                .with_context(|| format!("failed to read baseline: {}", path.display()))
        })
        .collect::<Result<_>>()?;
    info!(n_datasets = datasets.len(), "baseline data loaded");

    let thresholds =
        estimate_thresholds(&datasets, &threshold_cfg).context("threshold estimation failed")?;
    info!(
        n_cells = thresholds.grid().n_cells(),
        n_estimated = thresholds.n_estimated(),
        n_excluded = thresholds.excluded().len(),
        "thresholds estimated"
    );
    Ok(thresholds)
}
