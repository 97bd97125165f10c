//! Excess deaths attributable to heatwave days.
//!
//! For each cell-year with a heatwave day count `d`, expected annual deaths
//! `E = population * mortality_rate` are combined with the relative risk per
//! heatwave day `beta` under a [`RiskModel`]:
//!
//! - [`RiskModel::Linear`]: `E * beta * d`
//! - [`RiskModel::Compounded`]: `E * ((1 + beta)^d - 1)`
//!
//! Where annual excess-risk fractions are already known,
//! [`estimate_attributable_deaths`] computes `excess_risk * deaths` per
//! cell-year instead.
//!
//! Out-of-domain exogenous values are rejected, never clamped. Region totals
//! are plain sums computed in a fixed cell order.
//!
//! # Quick Start
//!
//! ```
//! use heatrisk_grid::{Grid, GroupKey};
//! use heatrisk_heatwave::HeatwaveDays;
//! use heatrisk_mortality::{
//!     ExcessConfig, ExposureTable, MortalityParams, estimate_excess_deaths,
//! };
//!
//! let grid = Grid::sequential(1).unwrap();
//! let key = GroupKey::new("ssp245", 2050);
//! let counts = HeatwaveDays::from_counts(grid.clone(), [(key.clone(), vec![Some(5)])]).unwrap();
//!
//! // 10 000 people at 0.0002 deaths per person-year: 2 expected deaths.
//! let exposure = ExposureTable::constant(grid, vec![10_000.0], vec![0.0002]).unwrap();
//! let params = MortalityParams::new(exposure, 0.01);
//!
//! let excess = estimate_excess_deaths(&counts, &params, &ExcessConfig::new()).unwrap();
//! assert!((excess.get(&key, 0).unwrap() - 0.1).abs() < 1e-12);
//! ```

mod attributable;
mod config;
mod error;
mod exposure;
mod model;
mod result;

pub use attributable::{DeathTable, estimate_attributable_deaths};
pub use config::{ExcessConfig, RiskModel};
pub use error::MortalityError;
pub use exposure::{ExposureTable, MortalityParams};
pub use model::{attributable_deaths, excess_deaths, expected_deaths};
pub use result::ExcessDeaths;

use heatrisk_heatwave::HeatwaveDays;
use tracing::debug;

/// Estimates excess deaths for every counted cell-year.
///
/// # Errors
///
/// - [`MortalityError::InvalidParameter`] for an invalid `beta` or an
///   out-of-domain population or mortality rate.
/// - [`MortalityError::Alignment`] if the exposure table is on a different
///   grid than the counts.
/// - [`MortalityError::MissingYear`] if a counted year has no exposure.
#[tracing::instrument(skip_all, fields(n_groups = counts.counts().len()))]
pub fn estimate_excess_deaths(
    counts: &HeatwaveDays,
    params: &MortalityParams,
    config: &ExcessConfig,
) -> Result<ExcessDeaths, MortalityError> {
    params.validate()?;
    counts
        .grid()
        .check_aligned(params.exposure().grid(), "exposure table")?;

    let model = config.risk_model();
    let deaths = counts.counts().try_map(|key, cell, count| -> Result<f64, MortalityError> {
        let expected = params.exposure().expected_deaths(key.year(), cell)?;
        excess_deaths(
            expected,
            i64::from(count.days()),
            params.risk_per_day(),
            model,
        )
    })?;

    let result = ExcessDeaths::new(deaths, Some(model));
    for (key, total) in result.totals() {
        debug!(group = %key, total, "excess deaths");
    }
    Ok(result)
}
