//! Baseline heat threshold estimation.
//!
//! Derives one temperature threshold per grid cell from historical daily
//! records. Every baseline dataset (for example several reanalysis products
//! or model runs over the same period) must sit on the same grid; their
//! readings for a cell are **pooled** into one sample, and the configured
//! percentile of that sample is the cell's threshold.
//!
//! # Method
//!
//! 1. Check all datasets are aligned to the first one's grid.
//! 2. Per cell, pool readings from every dataset, dropping NaN, infinities
//!    and the configured missing sentinel.
//! 3. If fewer than `min_valid_days` readings remain, fail (or exclude the
//!    cell, per [`InsufficientPolicy`]).
//! 4. Otherwise take the linear-interpolation percentile (R type 7) of the
//!    sorted pooled sample.
//!
//! Pooling is not the same as averaging per-dataset percentiles:
//! `[10, 20, 30]` and `[40, 50, 60]` give the 97.5th percentile of the six
//! values (58.75), not the mean of 29.5 and 59.5.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use heatrisk_grid::{DailyField, Grid};
//! use heatrisk_threshold::{ThresholdConfig, estimate_thresholds};
//!
//! let start = NaiveDate::from_ymd_opt(1991, 7, 1).unwrap();
//! let dates: Vec<NaiveDate> = start.iter_days().take(3).collect();
//! let a = DailyField::new(Grid::sequential(1).unwrap(), dates.clone(), vec![10.0, 20.0, 30.0]).unwrap();
//! let b = DailyField::new(Grid::sequential(1).unwrap(), dates, vec![40.0, 50.0, 60.0]).unwrap();
//!
//! let thresholds = estimate_thresholds(&[a, b], &ThresholdConfig::new()).unwrap();
//! assert!((thresholds.get(0).unwrap() - 58.75).abs() < 1e-9);
//! ```

mod config;
mod error;
mod pool;
mod result;

pub use config::{InsufficientPolicy, ThresholdConfig};
pub use error::ThresholdError;
pub use result::ThresholdGrid;

use heatrisk_grid::DailyField;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Estimates one threshold per grid cell from pooled baseline datasets.
///
/// # Errors
///
/// - [`ThresholdError::InvalidParameter`] if `config` is invalid.
/// - [`ThresholdError::EmptyInput`] if `datasets` is empty.
/// - [`ThresholdError::Alignment`] if any dataset's grid differs from the
///   first dataset's grid.
/// - [`ThresholdError::InsufficientData`] for the lowest-index cell below
///   `min_valid_days`, when the policy is [`InsufficientPolicy::Fail`].
#[tracing::instrument(skip(datasets, config), fields(n_datasets = datasets.len()))]
pub fn estimate_thresholds(
    datasets: &[DailyField],
    config: &ThresholdConfig,
) -> Result<ThresholdGrid, ThresholdError> {
    config.validate()?;

    let first = datasets.first().ok_or(ThresholdError::EmptyInput)?;
    for (i, d) in datasets.iter().enumerate().skip(1) {
        first
            .grid()
            .check_aligned(d.grid(), "baseline dataset")
            .map_err(|source| ThresholdError::Alignment { dataset: i, source })?;
    }

    let grid = first.grid().clone();
    let n_cells = grid.n_cells();

    let estimates: Vec<pool::CellEstimate> = (0..n_cells)
        .into_par_iter()
        .map(|cell| pool::estimate_cell(datasets, cell, config))
        .collect();

    let mut thresholds = Vec::with_capacity(n_cells);
    let mut valid_counts = Vec::with_capacity(n_cells);
    let mut excluded = Vec::new();

    for (cell, est) in estimates.into_iter().enumerate() {
        valid_counts.push(est.valid);
        if est.threshold.is_none() {
            let err = ThresholdError::InsufficientData {
                cell,
                cell_id: grid.cell_ids()[cell].clone(),
                valid: est.valid,
                required: config.min_valid_days(),
            };
            match config.on_insufficient() {
                InsufficientPolicy::Fail => return Err(err),
                InsufficientPolicy::Exclude => {
                    warn!(cell, valid = est.valid, "excluding cell from thresholds");
                    excluded.push(err);
                }
            }
        }
        thresholds.push(est.threshold);
    }

    debug!(
        n_cells,
        n_excluded = excluded.len(),
        percentile = config.percentile(),
        "thresholds estimated"
    );

    Ok(ThresholdGrid::new(grid, thresholds, valid_counts, excluded))
}
