//! Gridded daily temperature field.

use std::ops::Range;

use chrono::{Datelike, NaiveDate};

use crate::error::GridError;
use crate::grid::Grid;

/// Daily values for every cell of a [`Grid`] over a shared date axis.
///
/// Values are stored cell-major: `values[cell * n_days + day]`. Missing
/// readings are `NaN`. Dates are non-decreasing, so each calendar year
/// occupies one contiguous run of the date axis.
#[derive(Debug, Clone)]
pub struct DailyField {
    grid: Grid,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailyField {
    /// Create a field from a flat cell-major value buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] if `dates` is empty or not
    /// sorted, and [`GridError::Alignment`] if `values.len()` is not
    /// `n_cells * n_days`.
    pub fn new(grid: Grid, dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, GridError> {
        if dates.is_empty() {
            return Err(GridError::InvalidParameter {
                reason: "daily field must cover at least one date".to_string(),
            });
        }
        if let Some(i) = dates.windows(2).position(|w| w[1] < w[0]) {
            return Err(GridError::InvalidParameter {
                reason: format!(
                    "dates must be non-decreasing: {} follows {}",
                    dates[i + 1],
                    dates[i]
                ),
            });
        }
        let expected = grid.n_cells() * dates.len();
        if values.len() != expected {
            return Err(GridError::Alignment {
                what: "daily values (cells x days)".into(),
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            grid,
            dates,
            values,
        })
    }

    /// Create a field from one series per cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Alignment`] if the number of series differs from
    /// the number of cells or any series length differs from `dates.len()`,
    /// plus the errors of [`DailyField::new`].
    pub fn from_cells(
        grid: Grid,
        dates: Vec<NaiveDate>,
        cells: Vec<Vec<f64>>,
    ) -> Result<Self, GridError> {
        grid.check_len(cells.len(), "cell series")?;
        let n_days = dates.len();
        let mut values = Vec::with_capacity(n_days * cells.len());
        for series in cells {
            if series.len() != n_days {
                return Err(GridError::Alignment {
                    what: "days in cell series".into(),
                    expected: n_days,
                    got: series.len(),
                });
            }
            values.extend(series);
        }
        Self::new(grid, dates, values)
    }

    /// The grid this field covers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The shared date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of days on the date axis.
    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.grid.n_cells()
    }

    /// Daily series of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= n_cells()`.
    pub fn cell(&self, cell: usize) -> &[f64] {
        let n = self.n_days();
        &self.values[cell * n..(cell + 1) * n]
    }

    /// Contiguous day ranges of each calendar year, in date order.
    pub fn year_ranges(&self) -> Vec<(i32, Range<usize>)> {
        let mut ranges: Vec<(i32, Range<usize>)> = Vec::new();
        for (i, date) in self.dates.iter().enumerate() {
            let year = date.year();
            match ranges.last_mut() {
                Some((y, r)) if *y == year => r.end = i + 1,
                _ => ranges.push((year, i..i + 1)),
            }
        }
        ranges
    }
}
