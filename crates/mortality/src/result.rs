//! Result types for excess death estimation.

use std::collections::BTreeMap;

use heatrisk_grid::{CellGroups, Grid, GroupKey};

use crate::config::RiskModel;
use crate::error::MortalityError;

/// Excess deaths per (scenario, year) group and grid cell.
///
/// Cells without a heatwave count (or without a supplied excess risk) have
/// no estimate.
#[derive(Debug, Clone)]
pub struct ExcessDeaths {
    deaths: CellGroups<f64>,
    risk_model: Option<RiskModel>,
}

impl ExcessDeaths {
    pub(crate) fn new(deaths: CellGroups<f64>, risk_model: Option<RiskModel>) -> Self {
        Self { deaths, risk_model }
    }

    /// The per-group, per-cell estimates.
    pub fn deaths(&self) -> &CellGroups<f64> {
        &self.deaths
    }

    /// The grid the estimates are aligned to.
    pub fn grid(&self) -> &Grid {
        self.deaths.grid()
    }

    /// Risk model the estimates were computed with, `None` when they come
    /// from supplied excess-risk fractions.
    pub fn risk_model(&self) -> Option<RiskModel> {
        self.risk_model
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.deaths.keys()
    }

    /// Estimate of one cell in one group.
    pub fn get(&self, key: &GroupKey, cell: usize) -> Option<f64> {
        self.deaths.cell(key, cell).copied()
    }

    /// Total over a region of cells in one group.
    ///
    /// The result does not depend on the order of `cells`; repeated indices
    /// count once.
    pub fn region_total(&self, key: &GroupKey, cells: &[usize]) -> Result<f64, MortalityError> {
        Ok(self.deaths.region_sum(key, cells, |&v| v)?)
    }

    /// Total over the whole grid for every group.
    pub fn totals(&self) -> BTreeMap<GroupKey, f64> {
        self.deaths.totals(|&v| v)
    }
}
