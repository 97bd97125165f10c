//! Per-cell population and baseline mortality inputs.

use std::collections::BTreeMap;

use heatrisk_grid::Grid;

use crate::error::MortalityError;
use crate::model::{check_risk_per_day, expected_deaths};

/// One per-cell quantity with an optional default and per-year overrides.
#[derive(Debug, Clone, Default)]
struct Yearly {
    default: Option<Vec<f64>>,
    by_year: BTreeMap<i32, Vec<f64>>,
}

impl Yearly {
    fn for_year(&self, year: i32) -> Option<&[f64]> {
        self.by_year
            .get(&year)
            .or(self.default.as_ref())
            .map(Vec::as_slice)
    }
}

/// Population and annual baseline mortality rate per grid cell.
///
/// Each quantity has an optional all-years default and any number of
/// per-year overrides; a year's value is the override if present, otherwise
/// the default. Values are range-checked when used.
///
/// # Example
///
/// ```
/// use heatrisk_grid::Grid;
/// use heatrisk_mortality::ExposureTable;
///
/// let grid = Grid::sequential(2).unwrap();
/// let table = ExposureTable::constant(grid, vec![1000.0, 500.0], vec![0.002, 0.002])
///     .unwrap()
///     .with_population_for_year(2050, vec![1200.0, 600.0])
///     .unwrap();
///
/// assert_eq!(table.population(2050, 0).unwrap(), 1200.0);
/// assert_eq!(table.population(2040, 0).unwrap(), 1000.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExposureTable {
    grid: Grid,
    population: Yearly,
    mortality_rate: Yearly,
}

impl ExposureTable {
    /// Creates an empty table over `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            population: Yearly::default(),
            mortality_rate: Yearly::default(),
        }
    }

    /// Creates a table with the same population and rate for every year.
    pub fn constant(
        grid: Grid,
        population: Vec<f64>,
        mortality_rate: Vec<f64>,
    ) -> Result<Self, MortalityError> {
        Self::new(grid)
            .with_population(population)?
            .with_mortality_rate(mortality_rate)
    }

    /// Sets the all-years population.
    pub fn with_population(mut self, values: Vec<f64>) -> Result<Self, MortalityError> {
        self.grid.check_len(values.len(), "population values")?;
        self.population.default = Some(values);
        Ok(self)
    }

    /// Sets the all-years annual mortality rate.
    pub fn with_mortality_rate(mut self, values: Vec<f64>) -> Result<Self, MortalityError> {
        self.grid.check_len(values.len(), "mortality rate values")?;
        self.mortality_rate.default = Some(values);
        Ok(self)
    }

    /// Sets the population of one year.
    pub fn with_population_for_year(
        mut self,
        year: i32,
        values: Vec<f64>,
    ) -> Result<Self, MortalityError> {
        self.grid.check_len(values.len(), "population values")?;
        self.population.by_year.insert(year, values);
        Ok(self)
    }

    /// Sets the annual mortality rate of one year.
    pub fn with_mortality_rate_for_year(
        mut self,
        year: i32,
        values: Vec<f64>,
    ) -> Result<Self, MortalityError> {
        self.grid.check_len(values.len(), "mortality rate values")?;
        self.mortality_rate.by_year.insert(year, values);
        Ok(self)
    }

    /// The grid the table is aligned to.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Population of `cell` in `year`.
    pub fn population(&self, year: i32, cell: usize) -> Result<f64, MortalityError> {
        lookup(&self.population, "population", year, cell, self.grid.n_cells())
    }

    /// Annual mortality rate of `cell` in `year`.
    pub fn mortality_rate(&self, year: i32, cell: usize) -> Result<f64, MortalityError> {
        lookup(
            &self.mortality_rate,
            "mortality rate",
            year,
            cell,
            self.grid.n_cells(),
        )
    }

    /// Expected annual deaths of `cell` in `year`.
    ///
    /// # Errors
    ///
    /// [`MortalityError::MissingYear`] if either quantity has no value for
    /// `year`; [`MortalityError::InvalidParameter`] (naming the cell) for
    /// out-of-domain values.
    pub fn expected_deaths(&self, year: i32, cell: usize) -> Result<f64, MortalityError> {
        let population = self.population(year, cell)?;
        let rate = self.mortality_rate(year, cell)?;
        expected_deaths(population, rate).map_err(|e| match e {
            MortalityError::InvalidParameter { reason } => MortalityError::InvalidParameter {
                reason: format!(
                    "cell '{}' in {year}: {reason}",
                    self.grid.cell_id(cell).unwrap_or("?")
                ),
            },
            other => other,
        })
    }
}

fn lookup(
    values: &Yearly,
    what: &'static str,
    year: i32,
    cell: usize,
    n_cells: usize,
) -> Result<f64, MortalityError> {
    let row = values
        .for_year(year)
        .ok_or(MortalityError::MissingYear { what, year })?;
    row.get(cell).copied().ok_or(MortalityError::Alignment {
        source: heatrisk_grid::GridError::CellOutOfRange {
            index: cell,
            n_cells,
        },
    })
}

/// Exposure table plus the relative risk per heatwave day.
#[derive(Debug, Clone)]
pub struct MortalityParams {
    exposure: ExposureTable,
    risk_per_day: f64,
}

impl MortalityParams {
    /// Pairs an exposure table with `beta`, the relative risk added by one
    /// heatwave day.
    pub fn new(exposure: ExposureTable, risk_per_day: f64) -> Self {
        Self {
            exposure,
            risk_per_day,
        }
    }

    /// Per-cell exposure.
    pub fn exposure(&self) -> &ExposureTable {
        &self.exposure
    }

    /// Relative risk per heatwave day.
    pub fn risk_per_day(&self) -> f64 {
        self.risk_per_day
    }

    /// Checks that `risk_per_day` is finite and non-negative.
    pub fn validate(&self) -> Result<(), MortalityError> {
        check_risk_per_day(self.risk_per_day)
    }
}
