//! Rate-based benefit: a fixed number of deaths averted per million
//! person-days of heatwave exposure.

use heatrisk_grid::CellGroups;
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_mortality::{ExposureTable, MortalityError};
use tracing::debug;

use crate::band::{AgeBand, ByBand};
use crate::error::WarningError;

/// Deaths averted per million person-days, per band.
///
/// Defaults: 5.0 for the 65+ band and 0.0127 for the under-65 band.
#[derive(Clone, Debug)]
pub struct BenefitRates {
    over65_per_million: f64,
    under65_per_million: f64,
}

impl BenefitRates {
    /// Creates the default rates.
    pub fn new() -> Self {
        Self {
            over65_per_million: 5.0,
            under65_per_million: 0.0127,
        }
    }

    /// Sets the 65+ rate per million person-days.
    pub fn with_over65_per_million(mut self, rate: f64) -> Self {
        self.over65_per_million = rate;
        self
    }

    /// Sets the under-65 rate per million person-days.
    pub fn with_under65_per_million(mut self, rate: f64) -> Self {
        self.under65_per_million = rate;
        self
    }

    /// Rate of `band` per million person-days.
    pub fn per_million(&self, band: AgeBand) -> f64 {
        match band {
            AgeBand::Over65 => self.over65_per_million,
            AgeBand::Under65 => self.under65_per_million,
        }
    }

    /// Checks that both rates are finite and non-negative.
    pub fn validate(&self) -> Result<(), WarningError> {
        for band in AgeBand::ALL {
            let rate = self.per_million(band);
            if !rate.is_finite() || rate < 0.0 {
                return Err(WarningError::InvalidParameter {
                    reason: format!(
                        "{} benefit rate must be finite and non-negative, got {rate}",
                        band.label()
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for BenefitRates {
    fn default() -> Self {
        Self::new()
    }
}

/// Benefit per band: `population * days * rate_per_million / 1e6`.
///
/// Only the population of each exposure table is read. Cells without a
/// heatwave count have no benefit.
///
/// # Errors
///
/// - [`WarningError::InvalidParameter`] for invalid rates.
/// - [`WarningError::Alignment`] if a table is on a different grid.
/// - [`WarningError::Band`] for a missing year or an out-of-domain
///   population.
#[tracing::instrument(skip_all)]
pub fn rate_based_benefit(
    counts: &HeatwaveDays,
    populations: &ByBand<ExposureTable>,
    rates: &BenefitRates,
) -> Result<ByBand<CellGroups<f64>>, WarningError> {
    rates.validate()?;

    let band_benefit = |band: AgeBand| -> Result<CellGroups<f64>, WarningError> {
        let table = populations.get(band);
        counts
            .grid()
            .check_aligned(table.grid(), "population table")
            .map_err(|source| WarningError::Alignment { band, source })?;
        let rate = rates.per_million(band);

        counts
            .counts()
            .try_map(|key, cell, count| -> Result<f64, MortalityError> {
                let population = table.population(key.year(), cell)?;
                if !population.is_finite() || population < 0.0 {
                    return Err(MortalityError::InvalidParameter {
                        reason: format!(
                            "population of cell {cell} in {} must be finite and non-negative, got {population}",
                            key.year()
                        ),
                    });
                }
                Ok(population * f64::from(count.days()) * rate / 1e6)
            })
            .map_err(WarningError::in_band(band))
    };

    let over65 = band_benefit(AgeBand::Over65)?;
    let under65 = band_benefit(AgeBand::Under65)?;
    debug!(n_groups = over65.len(), "rate-based benefit computed");
    Ok(ByBand::new(over65, under65))
}
