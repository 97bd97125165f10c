//! Excess command: excess deaths from heatwave day counts or supplied
//! excess-risk fractions.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use heatrisk_heatwave::HeatwaveDays;
use heatrisk_io::{read_heatwave_days, write_excess_deaths};
use heatrisk_mortality::{ExcessDeaths, estimate_attributable_deaths, estimate_excess_deaths};

use crate::cli::ExcessArgs;
use crate::config::HeatriskConfig;
use crate::convert::{self, ExcessMethod};
use crate::inputs;

/// Run the excess-death stage on its own.
pub fn run(args: ExcessArgs) -> Result<()> {
    let _cmd = info_span!("excess").entered();
    let mut config = HeatriskConfig::load_or_default(args.config.as_deref())?;

    let exposure = &mut config.mortality.exposure;
    if args.population.is_some() {
        exposure.population = args.population;
    }
    if args.mortality_rate.is_some() {
        exposure.mortality_rate = args.mortality_rate;
    }
    if args.risk_per_day.is_some() {
        exposure.risk_per_day = args.risk_per_day;
    }
    let attributable = &mut config.mortality.attributable;
    if args.excess_risk.is_some() {
        attributable.excess_risk = args.excess_risk;
    }
    if args.deaths.is_some() {
        attributable.deaths = args.deaths;
    }
    if let Some(m) = args.risk_model {
        config.mortality.risk_model = m;
    }
    if let Some(m) = args.method {
        config.mortality.method = m;
    }

    let excess = match convert::parse_excess_method(&config.mortality.method)? {
        ExcessMethod::Risk => {
            let path = args
                .heatwave
                .as_ref()
                .ok_or_else(|| anyhow!("--heatwave is required by the risk method"))?;
            let counts = read_heatwave_days(path)
                .with_context(|| format!("failed to read heatwave days: {}", path.display()))?;
            risk_based(&config, &counts)?
        }
        ExcessMethod::Attributable => attributable_deaths(&config)?,
    };

    write_excess_deaths(&args.output, &excess)
        .with_context(|| format!("failed to write excess deaths: {}", args.output.display()))?;
    info!(path = %args.output.display(), "excess deaths written");
    Ok(())
}

/// Estimate excess deaths with the configured method.
///
/// `counts` is only read by the `risk` method.
pub fn estimate(config: &HeatriskConfig, counts: &HeatwaveDays) -> Result<ExcessDeaths> {
    match convert::parse_excess_method(&config.mortality.method)? {
        ExcessMethod::Risk => risk_based(config, counts),
        ExcessMethod::Attributable => attributable_deaths(config),
    }
}

/// Load exposure inputs and estimate excess deaths from heatwave days.
fn risk_based(config: &HeatriskConfig, counts: &HeatwaveDays) -> Result<ExcessDeaths> {
    let excess_cfg = convert::build_excess_config(&config.mortality)?;
    let params = inputs::load_mortality_params(
        &config.mortality.exposure,
        convert::POPULATION_PREFIX,
        "all ages",
    )?;

    let excess = estimate_excess_deaths(counts, &params, &excess_cfg)
        .context("excess death estimation failed")?;
    log_totals(&excess);
    Ok(excess)
}

/// Load excess-risk and deaths tables and multiply them per cell-year.
fn attributable_deaths(config: &HeatriskConfig) -> Result<ExcessDeaths> {
    let (excess_risk, deaths) = inputs::load_attributable_inputs(&config.mortality.attributable)?;
    let excess = estimate_attributable_deaths(&excess_risk, &deaths)
        .context("attributable death estimation failed")?;
    log_totals(&excess);
    Ok(excess)
}

fn log_totals(excess: &ExcessDeaths) {
    for (key, total) in excess.totals() {
        info!(group = %key, total, "excess deaths");
    }
}
