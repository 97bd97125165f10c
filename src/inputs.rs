//! Loading exogenous inputs named in the configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use heatrisk_grid::{CellGroups, GroupKey};
use heatrisk_io::{read_cell_column, read_yearly_table};
use heatrisk_mortality::{DeathTable, ExposureTable, MortalityParams};

use crate::config::{AttributableToml, ExposureToml, ProjectionPaths};

/// Reads the population table of one exposure into an [`ExposureTable`]
/// without mortality rates.
///
/// `what` names the population in error messages.
pub fn load_population(exp: &ExposureToml, default_prefix: &str, what: &str) -> Result<ExposureTable> {
    let path = exp
        .population
        .as_ref()
        .ok_or_else(|| anyhow!("no population table for {what}: set population in config"))?;
    let prefix = exp.population_prefix.as_deref().unwrap_or(default_prefix);

    let (grid, by_year) = read_yearly_table(path, prefix)
        .with_context(|| format!("failed to read {what} population: {}", path.display()))?
        .into_parts();
    debug!(what, n_years = by_year.len(), "population loaded");

    let mut table = ExposureTable::new(grid);
    for (year, values) in by_year {
        table = table.with_population_for_year(year, values)?;
    }
    Ok(table)
}

/// Reads population and mortality rate tables plus the per-day risk of one
/// exposure.
pub fn load_mortality_params(
    exp: &ExposureToml,
    default_prefix: &str,
    what: &str,
) -> Result<MortalityParams> {
    let population = load_population(exp, default_prefix, what)?;

    let rate_path = exp
        .mortality_rate
        .as_ref()
        .ok_or_else(|| anyhow!("no mortality rate table for {what}: set mortality_rate in config"))?;
    let (rate_grid, rates) = read_cell_column(rate_path, &exp.rate_column)
        .with_context(|| format!("failed to read {what} mortality rate: {}", rate_path.display()))?;
    population
        .grid()
        .check_aligned(&rate_grid, "mortality rate table")
        .with_context(|| {
            format!(
                "{what} mortality rate table {} does not match its population table",
                rate_path.display()
            )
        })?;

    let risk_per_day = exp
        .risk_per_day
        .ok_or_else(|| anyhow!("no risk_per_day for {what}: set risk_per_day in config"))?;

    Ok(MortalityParams::new(
        population.with_mortality_rate(rates)?,
        risk_per_day,
    ))
}

/// Loads the excess-risk and deaths tables of the `attributable` method.
///
/// Excess risks are grouped under the configured scenario label; a blank
/// excess risk leaves the cell-year without an estimate.
pub fn load_attributable_inputs(att: &AttributableToml) -> Result<(CellGroups<f64>, DeathTable)> {
    let er_path = att
        .excess_risk
        .as_ref()
        .ok_or_else(|| anyhow!("no excess risk table: set [mortality.attributable].excess_risk"))?;
    let deaths_path = att
        .deaths
        .as_ref()
        .ok_or_else(|| anyhow!("no deaths table: set [mortality.attributable].deaths"))?;

    let (er_grid, er_by_year) = read_yearly_table(er_path, &att.excess_risk_prefix)
        .with_context(|| format!("failed to read excess risk: {}", er_path.display()))?
        .into_parts();
    let mut excess_risk = CellGroups::new(er_grid);
    for (year, values) in er_by_year {
        let cells: Vec<Option<f64>> = values.into_iter().map(|v| (!v.is_nan()).then_some(v)).collect();
        excess_risk.insert(GroupKey::new(att.scenario.as_str(), year), cells)?;
    }

    let (d_grid, d_by_year) = read_yearly_table(deaths_path, &att.deaths_prefix)
        .with_context(|| format!("failed to read deaths: {}", deaths_path.display()))?
        .into_parts();
    let mut deaths = DeathTable::new(d_grid);
    for (year, values) in d_by_year {
        deaths = deaths.with_year(year, values)?;
    }
    debug!(n_years = excess_risk.len(), "attributable inputs loaded");
    Ok((excess_risk, deaths))
}

/// Parses `SCENARIO=PATH` projection arguments.
///
/// Repeating a scenario adds another table to it; repeating the same
/// scenario and path is an error.
pub fn parse_projection_args(args: &[String]) -> Result<BTreeMap<String, ProjectionPaths>> {
    let mut out: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for arg in args {
        let Some((label, path)) = arg.split_once('=') else {
            bail!("projection must be SCENARIO=PATH, got {arg:?}");
        };
        if label.is_empty() || path.is_empty() {
            bail!("projection must be SCENARIO=PATH, got {arg:?}");
        }
        let paths = out.entry(label.to_string()).or_default();
        let path = PathBuf::from(path);
        if paths.contains(&path) {
            bail!("projection {arg:?} given more than once");
        }
        paths.push(path);
    }
    Ok(out
        .into_iter()
        .map(|(label, paths)| (label, ProjectionPaths::Many(paths)))
        .collect())
}
