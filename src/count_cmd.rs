//! Count command: heatwave days per cell, scenario and year.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, info_span, warn};

use heatrisk_heatwave::{HeatwaveDays, Projection, count_heatwave_days};
use heatrisk_io::{read_daily_csv, read_thresholds, write_heatwave_days};
use heatrisk_threshold::ThresholdGrid;

use crate::cli::CountArgs;
use crate::config::HeatriskConfig;
use crate::convert;
use crate::inputs;

/// Run the counting stage on its own.
pub fn run(args: CountArgs) -> Result<()> {
    let _cmd = info_span!("count").entered();
    let mut config = HeatriskConfig::load_or_default(args.config.as_deref())?;

    if !args.projections.is_empty() {
        config.io.projections = inputs::parse_projection_args(&args.projections)?;
    }
    if let Some(c) = args.comparator {
        config.heatwave.comparator = c;
    }

    let reader_cfg = convert::build_reader_config(&config.io);
    let thresholds = read_thresholds(&args.thresholds, &reader_cfg)
        .with_context(|| format!("failed to read thresholds: {}", args.thresholds.display()))?;

    let counts = count(&config, &thresholds)?;
    write_heatwave_days(&args.output, &counts)
        .with_context(|| format!("failed to write heatwave days: {}", args.output.display()))?;
    info!(path = %args.output.display(), "heatwave days written");
    Ok(())
}

/// Read the projection tables and count heatwave days.
pub fn count(config: &HeatriskConfig, thresholds: &ThresholdGrid) -> Result<HeatwaveDays> {
    if config.io.projections.is_empty() {
        bail!("no projections: set [io.projections] in config or pass --projection");
    }
    let reader_cfg = convert::build_reader_config(&config.io);
    let counter_cfg = convert::build_counter_config(&config.heatwave, &config.io)?;

    let tables: Vec<(&str, &PathBuf)> = config
        .io
        .projections
        .iter()
        .flat_map(|(scenario, paths)| paths.paths().iter().map(move |p| (scenario.as_str(), p)))
        .collect();
    let projections: Vec<Projection> = tables
        .par_iter()
        .map(|&(scenario, path)| {
            read_daily_csv(path, &reader_cfg)
                .map(|field| Projection::new(scenario, field))
                .with_context(|| {
                    format!("failed to read projection '{scenario}': {}", path.display())
                })
        })
        .collect::<Result<_>>()?;
    info!(n_projections = projections.len(), "projection data loaded");

    let counts = count_heatwave_days(thresholds, &projections, &counter_cfg)
        .context("heatwave day counting failed")?;

    let low = counts.low_confidence();
    if !low.is_empty() {
        warn!(
            n_cell_years = low.len(),
            "cell-years had no valid readings; their counts are zero"
        );
    }
    info!(n_groups = counts.counts().len(), "heatwave days counted");
    Ok(counts)
}
