//! Result types for early-warning benefit estimation.

use std::collections::BTreeMap;

use heatrisk_grid::{CellGroups, Grid, GroupKey};
use heatrisk_mortality::{MortalityError, RiskModel};

use crate::band::{AgeBand, ByBand};
use crate::error::WarningError;

/// Excess deaths of one cell-year and band with and without a warning
/// system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandOutcome {
    excess_without: f64,
    excess_with: f64,
    averted: f64,
}

impl BandOutcome {
    pub(crate) fn new(excess_without: f64, excess_with: f64) -> Self {
        Self {
            excess_without,
            excess_with,
            averted: (excess_without - excess_with).max(0.0),
        }
    }

    /// Excess deaths without a warning system.
    pub fn excess_without(&self) -> f64 {
        self.excess_without
    }

    /// Excess deaths with the reduced per-day risk.
    pub fn excess_with(&self) -> f64 {
        self.excess_with
    }

    /// Deaths averted (never negative).
    pub fn averted(&self) -> f64 {
        self.averted
    }
}

/// Averted deaths per age band, (scenario, year) group and grid cell.
///
/// Bands are kept apart. A total over both bands is the caller's sum of
/// [`AvertedDeaths::totals`] for each band.
#[derive(Debug, Clone)]
pub struct AvertedDeaths {
    bands: ByBand<CellGroups<BandOutcome>>,
    risk_model: RiskModel,
}

impl AvertedDeaths {
    pub(crate) fn new(bands: ByBand<CellGroups<BandOutcome>>, risk_model: RiskModel) -> Self {
        Self { bands, risk_model }
    }

    /// Per-group, per-cell outcomes of one band.
    pub fn band(&self, band: AgeBand) -> &CellGroups<BandOutcome> {
        self.bands.get(band)
    }

    /// The grid the outcomes are aligned to.
    pub fn grid(&self) -> &Grid {
        self.bands.get(AgeBand::Over65).grid()
    }

    /// Risk model the outcomes were computed with.
    pub fn risk_model(&self) -> RiskModel {
        self.risk_model
    }

    /// Outcome of one cell in one group and band.
    pub fn get(&self, band: AgeBand, key: &GroupKey, cell: usize) -> Option<&BandOutcome> {
        self.band(band).cell(key, cell)
    }

    /// Averted deaths of one cell in one group and band.
    pub fn averted(&self, band: AgeBand, key: &GroupKey, cell: usize) -> Option<f64> {
        self.get(band, key, cell).map(BandOutcome::averted)
    }

    /// Averted deaths of one band summed over a region of cells.
    pub fn region_total(
        &self,
        band: AgeBand,
        key: &GroupKey,
        cells: &[usize],
    ) -> Result<f64, WarningError> {
        self.band(band)
            .region_sum(key, cells, BandOutcome::averted)
            .map_err(MortalityError::from)
            .map_err(WarningError::in_band(band))
    }

    /// Averted deaths of one band summed over the grid, per group.
    pub fn totals(&self, band: AgeBand) -> BTreeMap<GroupKey, f64> {
        self.band(band).totals(BandOutcome::averted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatrisk_grid::ErrorKind;

    #[test]
    fn averted_is_non_negative() {
        let o = BandOutcome::new(0.3, 0.1);
        assert!((o.averted() - 0.2).abs() < 1e-15);
        assert_eq!(BandOutcome::new(0.1, 0.3).averted(), 0.0);
    }

    #[test]
    fn totals_per_band() {
        let grid = Grid::sequential(2).unwrap();
        let key = GroupKey::new("s", 2050);
        let mut old = CellGroups::new(grid.clone());
        old.insert(
            key.clone(),
            vec![Some(BandOutcome::new(1.0, 0.5)), Some(BandOutcome::new(2.0, 1.0))],
        )
        .unwrap();
        let mut young = CellGroups::new(grid);
        young
            .insert(key.clone(), vec![Some(BandOutcome::new(0.2, 0.1)), None])
            .unwrap();
        let ad = AvertedDeaths::new(ByBand::new(old, young), RiskModel::Linear);

        assert!((ad.totals(AgeBand::Over65)[&key] - 1.5).abs() < 1e-12);
        assert!((ad.totals(AgeBand::Under65)[&key] - 0.1).abs() < 1e-12);
        assert_eq!(ad.averted(AgeBand::Under65, &key, 1), None);
        assert!((ad.region_total(AgeBand::Over65, &key, &[1]).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn region_total_errors_keep_their_kind() {
        let grid = Grid::sequential(1).unwrap();
        let key = GroupKey::new("s", 2050);
        let mut old = CellGroups::new(grid.clone());
        old.insert(key.clone(), vec![Some(BandOutcome::new(1.0, 0.5))])
            .unwrap();
        let mut young = CellGroups::new(grid);
        young.insert(key.clone(), vec![None]).unwrap();
        let ad = AvertedDeaths::new(ByBand::new(old, young), RiskModel::Linear);

        let unknown = ad
            .region_total(AgeBand::Over65, &GroupKey::new("s", 2099), &[0])
            .unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::InvalidParameter);
        assert!(matches!(
            unknown,
            WarningError::Band {
                band: AgeBand::Over65,
                ..
            }
        ));

        let out_of_range = ad.region_total(AgeBand::Under65, &key, &[3]).unwrap_err();
        assert_eq!(out_of_range.kind(), ErrorKind::Alignment);
    }
}
