//! Heatwave day counting.
//!
//! Counts, per grid cell and calendar year, the days on which a projected
//! daily temperature exceeds the cell's baseline threshold. Each projection
//! carries a scenario label; counts for different scenarios are kept in
//! separate groups and never merged.
//!
//! # Rules
//!
//! - The exceedance test is an explicit [`Comparator`]: `Strict` (`>`, the
//!   default) or `Inclusive` (`>=`).
//! - Missing readings (NaN, infinities, the configured sentinel) are not
//!   exceedances and are not treated as zero-temperature days.
//! - A cell-year with no valid reading gets a count of zero marked
//!   [`Coverage::NoValidDays`]; it is not an error.
//! - A cell without a threshold gets no count at all.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use heatrisk_grid::{DailyField, Grid, GroupKey};
//! use heatrisk_heatwave::{CounterConfig, Projection, count_heatwave_days};
//! use heatrisk_threshold::ThresholdGrid;
//!
//! let grid = Grid::sequential(1).unwrap();
//! let thresholds = ThresholdGrid::from_values(grid.clone(), vec![Some(30.0)]).unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2050, 7, 1).unwrap();
//! let dates: Vec<NaiveDate> = start.iter_days().take(4).collect();
//! let field = DailyField::new(grid, dates, vec![29.0, 31.0, 32.5, 30.0]).unwrap();
//!
//! let counts = count_heatwave_days(
//!     &thresholds,
//!     &[Projection::new("ssp245", field)],
//!     &CounterConfig::new(),
//! )
//! .unwrap();
//! assert_eq!(counts.days(&GroupKey::new("ssp245", 2050), 0), Some(2));
//! ```

mod config;
mod count;
mod error;
mod result;

pub use config::{Comparator, CounterConfig};
pub use error::HeatwaveError;
pub use result::{Coverage, DayCount, HeatwaveDays};

use std::collections::BTreeSet;

use heatrisk_grid::{CellGroups, DailyField, GroupKey};
use heatrisk_threshold::ThresholdGrid;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Future daily temperatures of one climate scenario.
///
/// A scenario may be split over several projections (for example one file
/// per year) as long as no calendar year appears in two of them.
#[derive(Debug, Clone)]
pub struct Projection {
    scenario: String,
    field: DailyField,
}

impl Projection {
    /// Labels a daily field with its scenario.
    pub fn new(scenario: impl Into<String>, field: DailyField) -> Self {
        Self {
            scenario: scenario.into(),
            field,
        }
    }

    /// Scenario label.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Daily temperatures.
    pub fn field(&self) -> &DailyField {
        &self.field
    }
}

/// Counts heatwave days per (scenario, year) and grid cell.
///
/// # Errors
///
/// - [`HeatwaveError::InvalidParameter`] if `config` is invalid.
/// - [`HeatwaveError::EmptyInput`] if `projections` is empty.
/// - [`HeatwaveError::DuplicateGroup`] if two projections of the same
///   scenario cover the same year.
/// - [`HeatwaveError::Alignment`] if a projection's grid differs from the
///   threshold grid.
#[tracing::instrument(skip(thresholds, projections, config), fields(n_projections = projections.len()))]
pub fn count_heatwave_days(
    thresholds: &ThresholdGrid,
    projections: &[Projection],
    config: &CounterConfig,
) -> Result<HeatwaveDays, HeatwaveError> {
    config.validate()?;
    if projections.is_empty() {
        return Err(HeatwaveError::EmptyInput);
    }

    let mut seen = BTreeSet::new();
    for p in projections {
        for (year, _) in p.field().year_ranges() {
            if !seen.insert(GroupKey::new(p.scenario(), year)) {
                return Err(HeatwaveError::DuplicateGroup {
                    scenario: p.scenario().to_string(),
                    year,
                });
            }
        }
        thresholds
            .grid()
            .check_aligned(p.field().grid(), "projection")
            .map_err(|source| HeatwaveError::Alignment {
                scenario: p.scenario().to_string(),
                source,
            })?;
    }

    let mut counts = CellGroups::new(thresholds.grid().clone());
    let n_cells = thresholds.grid().n_cells();

    for p in projections {
        let field = p.field();
        for (year, range) in field.year_ranges() {
            let cells: Vec<Option<DayCount>> = (0..n_cells)
                .into_par_iter()
                .map(|cell| {
                    thresholds.get(cell).map(|thr| {
                        count::count_exceedances(&field.cell(cell)[range.clone()], thr, config)
                    })
                })
                .collect();

            let n_flagged = cells.iter().flatten().filter(|c| c.is_low_confidence()).count();
            if n_flagged > 0 {
                warn!(
                    scenario = p.scenario(),
                    year, n_flagged, "cell-years without any valid reading"
                );
            }

            counts.insert(GroupKey::new(p.scenario(), year), cells)?;
        }
        debug!(scenario = p.scenario(), "projection counted");
    }

    Ok(HeatwaveDays::new(counts, config.comparator()))
}
