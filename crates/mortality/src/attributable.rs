//! Heat-attributable deaths from supplied annual excess-risk fractions.

use std::collections::BTreeMap;

use heatrisk_grid::{CellGroups, Grid, GridError};
use tracing::debug;

use crate::error::MortalityError;
use crate::model::attributable;
use crate::result::ExcessDeaths;

/// Annual deaths per grid cell, by year.
#[derive(Debug, Clone)]
pub struct DeathTable {
    grid: Grid,
    by_year: BTreeMap<i32, Vec<f64>>,
}

impl DeathTable {
    /// Creates an empty table over `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            by_year: BTreeMap::new(),
        }
    }

    /// Sets the deaths of one year.
    pub fn with_year(mut self, year: i32, values: Vec<f64>) -> Result<Self, MortalityError> {
        self.grid.check_len(values.len(), "death values")?;
        self.by_year.insert(year, values);
        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Years with values, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Deaths of one cell in one year.
    ///
    /// # Errors
    ///
    /// [`MortalityError::MissingYear`] if the year has no values.
    pub fn deaths(&self, year: i32, cell: usize) -> Result<f64, MortalityError> {
        let values = self
            .by_year
            .get(&year)
            .ok_or(MortalityError::MissingYear {
                what: "deaths",
                year,
            })?;
        let value = values.get(cell).ok_or(GridError::CellOutOfRange {
            index: cell,
            n_cells: self.grid.n_cells(),
        })?;
        Ok(*value)
    }
}

/// Deaths attributable to heat, `excess_risk * deaths`, for every cell-year
/// with a supplied excess-risk fraction.
///
/// Groups are matched to death counts by year only, so several scenarios
/// can share one death table.
///
/// # Errors
///
/// - [`MortalityError::Alignment`] if the death table is on a different
///   grid than the excess risks.
/// - [`MortalityError::MissingYear`] if a year has no death counts.
/// - [`MortalityError::InvalidParameter`] for a negative or non-finite
///   excess risk or death count.
#[tracing::instrument(skip_all, fields(n_groups = excess_risk.len()))]
pub fn estimate_attributable_deaths(
    excess_risk: &CellGroups<f64>,
    deaths: &DeathTable,
) -> Result<ExcessDeaths, MortalityError> {
    excess_risk
        .grid()
        .check_aligned(deaths.grid(), "death table")?;

    let out = excess_risk.try_map(|key, cell, &er| -> Result<f64, MortalityError> {
        let d = deaths.deaths(key.year(), cell)?;
        attributable(er, d, || format!("of cell {cell} in {key}"))
    })?;

    let result = ExcessDeaths::new(out, None);
    for (key, total) in result.totals() {
        debug!(group = %key, total, "attributable deaths");
    }
    Ok(result)
}
