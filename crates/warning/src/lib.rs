//! Deaths averted by a heat early-warning system.
//!
//! A warning system is modelled as a fractional cut `r` to the per-day
//! relative risk of heatwave days, set separately for people aged 65 and
//! over and for those under 65. For each band, cell and year the excess
//! deaths are computed twice with the same risk model, once with `beta`
//! and once with `beta * (1 - r)`; the non-negative difference is the
//! number of deaths averted.
//!
//! Bands are estimated independently and never added together here.
//!
//! A simpler per-person-day estimator, [`rate_based_benefit`], is also
//! provided.
//!
//! # Quick Start
//!
//! ```
//! use heatrisk_grid::{Grid, GroupKey};
//! use heatrisk_heatwave::HeatwaveDays;
//! use heatrisk_mortality::{ExposureTable, MortalityParams};
//! use heatrisk_warning::{AgeBand, AgeBandParams, WarningConfig, estimate_warning_benefit};
//!
//! let grid = Grid::sequential(1).unwrap();
//! let key = GroupKey::new("ssp245", 2050);
//! let counts = HeatwaveDays::from_counts(grid.clone(), [(key.clone(), vec![Some(5)])]).unwrap();
//!
//! let old = ExposureTable::constant(grid.clone(), vec![1000.0], vec![0.002]).unwrap();
//! let young = ExposureTable::constant(grid, vec![9000.0], vec![0.0005]).unwrap();
//! let params = AgeBandParams::new(
//!     MortalityParams::new(old, 0.01),
//!     MortalityParams::new(young, 0.004),
//! );
//!
//! let config = WarningConfig::new().with_risk_reduction_over65(0.5);
//! let averted = estimate_warning_benefit(&counts, &params, &config).unwrap();
//! let outcome = averted.get(AgeBand::Over65, &key, 0).unwrap();
//! assert!((outcome.averted() - 0.05).abs() < 1e-12);
//! ```

mod band;
mod config;
mod error;
mod rate;
mod result;

pub use band::{AgeBand, ByBand};
pub use config::WarningConfig;
pub use error::WarningError;
pub use rate::{BenefitRates, rate_based_benefit};
pub use result::{AvertedDeaths, BandOutcome};

use heatrisk_grid::CellGroups;
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_mortality::{MortalityError, MortalityParams, excess_deaths};
use tracing::debug;

/// Exposure and per-day relative risk of both age bands.
#[derive(Debug, Clone)]
pub struct AgeBandParams {
    bands: ByBand<MortalityParams>,
}

impl AgeBandParams {
    /// Pairs the 65+ and under-65 parameters.
    pub fn new(over65: MortalityParams, under65: MortalityParams) -> Self {
        Self {
            bands: ByBand::new(over65, under65),
        }
    }

    /// Parameters of one band.
    pub fn get(&self, band: AgeBand) -> &MortalityParams {
        self.bands.get(band)
    }
}

/// Estimates deaths averted per age band for every counted cell-year.
///
/// The two bands are computed concurrently.
///
/// # Errors
///
/// - [`WarningError::InvalidParameter`] if a risk reduction is outside
///   `0..=1`.
/// - [`WarningError::Alignment`] if a band's exposure table is on a
///   different grid than the counts.
/// - [`WarningError::Band`] for an invalid `beta`, a missing year or an
///   out-of-domain population or mortality rate.
#[tracing::instrument(skip_all, fields(n_groups = counts.counts().len()))]
pub fn estimate_warning_benefit(
    counts: &HeatwaveDays,
    params: &AgeBandParams,
    config: &WarningConfig,
) -> Result<AvertedDeaths, WarningError> {
    config.validate()?;

    let (over65, under65) = rayon::join(
        || band_outcomes(counts, params.get(AgeBand::Over65), config, AgeBand::Over65),
        || band_outcomes(counts, params.get(AgeBand::Under65), config, AgeBand::Under65),
    );

    Ok(AvertedDeaths::new(
        ByBand::new(over65?, under65?),
        config.risk_model(),
    ))
}

fn band_outcomes(
    counts: &HeatwaveDays,
    params: &MortalityParams,
    config: &WarningConfig,
    band: AgeBand,
) -> Result<CellGroups<BandOutcome>, WarningError> {
    let to_band = WarningError::in_band(band);
    params.validate().map_err(&to_band)?;
    counts
        .grid()
        .check_aligned(params.exposure().grid(), "exposure table")
        .map_err(|source| WarningError::Alignment { band, source })?;

    let model = config.risk_model();
    let beta = params.risk_per_day();
    let reduced = beta * (1.0 - config.risk_reduction(band));

    let outcomes = counts
        .counts()
        .try_map(|key, cell, count| -> Result<BandOutcome, MortalityError> {
            let expected = params.exposure().expected_deaths(key.year(), cell)?;
            let days = i64::from(count.days());
            let without = excess_deaths(expected, days, beta, model)?;
            let with = excess_deaths(expected, days, reduced, model)?;
            Ok(BandOutcome::new(without, with))
        })
        .map_err(&to_band)?;

    for (key, total) in outcomes.totals(BandOutcome::averted) {
        debug!(band = band.label(), group = %key, total, "averted deaths");
    }
    Ok(outcomes)
}
