//! Result type for threshold estimation.

use heatrisk_grid::Grid;

use crate::error::ThresholdError;

/// One heat threshold per grid cell.
///
/// A cell has no threshold only when it was excluded under
/// [`InsufficientPolicy::Exclude`](crate::InsufficientPolicy::Exclude); the
/// reason is kept in [`ThresholdGrid::excluded`].
#[derive(Debug, Clone)]
pub struct ThresholdGrid {
    grid: Grid,
    thresholds: Vec<Option<f64>>,
    /// Valid pooled samples per cell (0 for thresholds supplied externally).
    valid_counts: Vec<usize>,
    excluded: Vec<ThresholdError>,
}

impl ThresholdGrid {
    pub(crate) fn new(
        grid: Grid,
        thresholds: Vec<Option<f64>>,
        valid_counts: Vec<usize>,
        excluded: Vec<ThresholdError>,
    ) -> Self {
        Self {
            grid,
            thresholds,
            valid_counts,
            excluded,
        }
    }

    /// Wrap thresholds computed elsewhere (for example read back from disk)
    /// so the day counter can run on its own.
    ///
    /// `None` marks a cell without a threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError::Alignment`] if `thresholds` does not have
    /// one entry per cell and [`ThresholdError::InvalidParameter`] if any
    /// threshold is not finite.
    pub fn from_values(grid: Grid, thresholds: Vec<Option<f64>>) -> Result<Self, ThresholdError> {
        grid.check_len(thresholds.len(), "thresholds")?;
        if let Some((cell, v)) = thresholds
            .iter()
            .enumerate()
            .find_map(|(i, t)| t.filter(|v| !v.is_finite()).map(|v| (i, v)))
        {
            return Err(ThresholdError::InvalidParameter {
                reason: format!("threshold for cell {cell} is not finite: {v}"),
            });
        }
        let n = grid.n_cells();
        Ok(Self::new(grid, thresholds, vec![0; n], Vec::new()))
    }

    /// The grid the thresholds are aligned to.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Per-cell thresholds in grid order.
    pub fn thresholds(&self) -> &[Option<f64>] {
        &self.thresholds
    }

    /// Threshold of one cell, if it has one.
    pub fn get(&self, cell: usize) -> Option<f64> {
        self.thresholds.get(cell).copied().flatten()
    }

    /// Valid pooled sample count per cell.
    pub fn valid_counts(&self) -> &[usize] {
        &self.valid_counts
    }

    /// Errors of the cells left without a threshold.
    pub fn excluded(&self) -> &[ThresholdError] {
        &self.excluded
    }

    /// Number of cells that have a threshold.
    pub fn n_estimated(&self) -> usize {
        self.thresholds.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_accessors() {
        let grid = Grid::sequential(3).unwrap();
        let t = ThresholdGrid::from_values(grid, vec![Some(30.0), None, Some(28.5)]).unwrap();
        assert_eq!(t.get(0), Some(30.0));
        assert_eq!(t.get(1), None);
        assert_eq!(t.get(7), None);
        assert_eq!(t.n_estimated(), 2);
        assert!(t.excluded().is_empty());
        assert_eq!(t.valid_counts(), &[0, 0, 0]);
    }

    #[test]
    fn from_values_checks_length() {
        let grid = Grid::sequential(3).unwrap();
        let err = ThresholdGrid::from_values(grid, vec![Some(30.0)]).unwrap_err();
        assert!(matches!(err, ThresholdError::Alignment { .. }));
    }

    #[test]
    fn from_values_rejects_nan() {
        let grid = Grid::sequential(2).unwrap();
        let err = ThresholdGrid::from_values(grid, vec![Some(30.0), Some(f64::NAN)]).unwrap_err();
        assert!(matches!(err, ThresholdError::InvalidParameter { .. }));
    }
}
