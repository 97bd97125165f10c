//! Benefit command: deaths averted by an early-warning system.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use heatrisk_grid::CellGroups;
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_io::{read_heatwave_days, write_averted_deaths, write_rate_benefit};
use heatrisk_warning::{
    AgeBand, AgeBandParams, AvertedDeaths, ByBand, estimate_warning_benefit, rate_based_benefit,
};

use crate::cli::BenefitArgs;
use crate::config::HeatriskConfig;
use crate::convert::{self, BenefitMethod};
use crate::inputs;

/// Benefit estimates from either method.
pub enum Benefit {
    /// Excess deaths with and without a warning system, per band.
    Averted(AvertedDeaths),
    /// Deaths averted per million person-days, per band.
    Rate(ByBand<CellGroups<f64>>),
}

impl Benefit {
    /// Write the estimates as CSV.
    pub fn write(&self, path: &Path) -> Result<()> {
        match self {
            Benefit::Averted(a) => write_averted_deaths(path, a),
            Benefit::Rate(r) => write_rate_benefit(path, r),
        }
        .with_context(|| format!("failed to write benefits: {}", path.display()))
    }

    /// Per-band totals over the grid, logged per group.
    fn log_totals(&self) {
        for band in AgeBand::ALL {
            let totals = match self {
                Benefit::Averted(a) => a.totals(band),
                Benefit::Rate(r) => r.get(band).totals(|&v| v),
            };
            for (key, total) in totals {
                info!(band = band.label(), group = %key, total, "deaths averted");
            }
        }
    }
}

/// Run the benefit stage on its own.
pub fn run(args: BenefitArgs) -> Result<()> {
    let _cmd = info_span!("benefit").entered();
    let mut config = HeatriskConfig::load_or_default(args.config.as_deref())?;

    if let Some(m) = args.risk_model {
        config.mortality.risk_model = m;
    }
    let w = &mut config.warning;
    if let Some(m) = args.method {
        w.method = m;
    }
    if args.pop_over65.is_some() {
        w.over65.population = args.pop_over65;
    }
    if args.pop_under65.is_some() {
        w.under65.population = args.pop_under65;
    }
    if let Some(r) = args.reduction_over65 {
        w.risk_reduction_over65 = r;
    }
    if let Some(r) = args.reduction_under65 {
        w.risk_reduction_under65 = r;
    }

    let counts = read_heatwave_days(&args.heatwave)
        .with_context(|| format!("failed to read heatwave days: {}", args.heatwave.display()))?;

    let benefit = estimate(&config, &counts)?;
    benefit.write(&args.output)?;
    info!(path = %args.output.display(), "benefits written");
    Ok(())
}

/// Load band inputs and estimate early-warning benefits.
pub fn estimate(config: &HeatriskConfig, counts: &HeatwaveDays) -> Result<Benefit> {
    let w = &config.warning;
    let benefit = match convert::parse_benefit_method(&w.method)? {
        BenefitMethod::Risk => {
            let warning_cfg = convert::build_warning_config(w, &config.mortality)?;
            let params = AgeBandParams::new(
                inputs::load_mortality_params(&w.over65, convert::POPULATION_PREFIX_OVER65, "65+")?,
                inputs::load_mortality_params(
                    &w.under65,
                    convert::POPULATION_PREFIX_UNDER65,
                    "under 65",
                )?,
            );
            let averted = estimate_warning_benefit(counts, &params, &warning_cfg)
                .context("early-warning benefit estimation failed")?;
            Benefit::Averted(averted)
        }
        BenefitMethod::Rate => {
            let rates = convert::build_benefit_rates(w)?;
            let populations = ByBand::new(
                inputs::load_population(&w.over65, convert::POPULATION_PREFIX_OVER65, "65+")?,
                inputs::load_population(
                    &w.under65,
                    convert::POPULATION_PREFIX_UNDER65,
                    "under 65",
                )?,
            );
            let benefit = rate_based_benefit(counts, &populations, &rates)
                .context("rate-based benefit estimation failed")?;
            Benefit::Rate(benefit)
        }
    };
    benefit.log_totals();
    Ok(benefit)
}
