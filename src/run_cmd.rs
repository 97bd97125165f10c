//! Run command: all four stages from one configuration file.

use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use heatrisk_io::{write_excess_deaths, write_heatwave_days, write_thresholds};

use crate::cli::RunArgs;
use crate::config::HeatriskConfig;
use crate::{benefit_cmd, count_cmd, excess_cmd, threshold_cmd};

/// Output file names inside the output directory.
pub const THRESHOLDS_FILE: &str = "thresholds.csv";
pub const HEATWAVE_DAYS_FILE: &str = "heatwave_days.csv";
pub const EXCESS_DEATHS_FILE: &str = "excess_deaths.csv";
pub const BENEFIT_FILE: &str = "warning_benefit.csv";

/// Run the full pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let mut config = HeatriskConfig::load(&args.config)?;
    if let Some(dir) = args.output_dir {
        config.io.output_dir = dir;
    }
    pipeline(&config)
}

/// Threshold and count in sequence, then excess deaths and benefits
/// concurrently. Each stage's result is written before the next starts.
pub fn pipeline(config: &HeatriskConfig) -> Result<()> {
    let out = &config.io.output_dir;
    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory: {}", out.display()))?;

    // Step 1: thresholds
    let thresholds = threshold_cmd::estimate(config)?;
    let path = out.join(THRESHOLDS_FILE);
    write_thresholds(&path, &thresholds, &config.io.threshold_column)
        .with_context(|| format!("failed to write thresholds: {}", path.display()))?;

    // Step 2: heatwave days
    let counts = count_cmd::count(config, &thresholds)?;
    let path = out.join(HEATWAVE_DAYS_FILE);
    write_heatwave_days(&path, &counts)
        .with_context(|| format!("failed to write heatwave days: {}", path.display()))?;

    // Step 3 + 4: independent consumers of the counts
    let (excess, benefit) = rayon::join(
        || excess_cmd::estimate(config, &counts),
        || benefit_cmd::estimate(config, &counts),
    );

    let path = out.join(EXCESS_DEATHS_FILE);
    write_excess_deaths(&path, &excess?)
        .with_context(|| format!("failed to write excess deaths: {}", path.display()))?;
    benefit?.write(&out.join(BENEFIT_FILE))?;

    info!(dir = %out.display(), "pipeline complete");
    Ok(())
}
