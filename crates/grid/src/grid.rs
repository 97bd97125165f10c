//! Spatial grid: the ordered set of cells every per-cell vector refers to.

use std::collections::HashSet;

use crate::error::GridError;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Ordered collection of grid cells.
///
/// Cell `i` of every per-cell vector in the workspace refers to
/// `cell_ids()[i]`. Ids are unique. Coordinates are optional; when present
/// there is one latitude and one longitude per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cell_ids: Vec<String>,
    coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq)]
struct Coordinates {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl Grid {
    /// Create a grid from cell ids.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] if `cell_ids` is empty and
    /// [`GridError::DuplicateCell`] if an id appears more than once.
    pub fn new<I, S>(cell_ids: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cell_ids: Vec<String> = cell_ids.into_iter().map(Into::into).collect();
        if cell_ids.is_empty() {
            return Err(GridError::InvalidParameter {
                reason: "grid must contain at least one cell".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(cell_ids.len());
        for id in &cell_ids {
            if !seen.insert(id.as_str()) {
                return Err(GridError::DuplicateCell { id: id.clone() });
            }
        }

        Ok(Self {
            cell_ids,
            coordinates: None,
        })
    }

    /// Create a grid of `n_cells` cells with ids `"0"`, `"1"`, ...
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] if `n_cells` is zero.
    pub fn sequential(n_cells: usize) -> Result<Self, GridError> {
        Self::new((0..n_cells).map(|i| i.to_string()))
    }

    /// Attach per-cell latitude and longitude.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Alignment`] if either coordinate array length
    /// differs from the number of cells.
    pub fn with_coordinates(mut self, lats: Vec<f64>, lons: Vec<f64>) -> Result<Self, GridError> {
        let n = self.n_cells();
        if lats.len() != n {
            return Err(GridError::Alignment {
                what: "latitudes".into(),
                expected: n,
                got: lats.len(),
            });
        }
        if lons.len() != n {
            return Err(GridError::Alignment {
                what: "longitudes".into(),
                expected: n,
                got: lons.len(),
            });
        }
        self.coordinates = Some(Coordinates { lats, lons });
        Ok(self)
    }

    /// Total number of grid cells.
    pub fn n_cells(&self) -> usize {
        self.cell_ids.len()
    }

    /// All cell ids in grid order.
    pub fn cell_ids(&self) -> &[String] {
        &self.cell_ids
    }

    /// Id of the cell at `index`, if in range.
    pub fn cell_id(&self, index: usize) -> Option<&str> {
        self.cell_ids.get(index).map(String::as_str)
    }

    /// Position of a cell id, if present.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.cell_ids.iter().position(|c| c == id)
    }

    /// Per-cell latitudes, if attached.
    pub fn lats(&self) -> Option<&[f64]> {
        self.coordinates.as_ref().map(|c| c.lats.as_slice())
    }

    /// Per-cell longitudes, if attached.
    pub fn lons(&self) -> Option<&[f64]> {
        self.coordinates.as_ref().map(|c| c.lons.as_slice())
    }

    /// Check that `other` describes the same cells in the same order.
    ///
    /// Coordinates are not compared: the cell id is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Alignment`] on a cell-count mismatch and
    /// [`GridError::CellMismatch`] at the first differing id.
    pub fn check_aligned(&self, other: &Grid, what: &str) -> Result<(), GridError> {
        if self.n_cells() != other.n_cells() {
            return Err(GridError::Alignment {
                what: format!("{what} cell count"),
                expected: self.n_cells(),
                got: other.n_cells(),
            });
        }
        if let Some(index) = self
            .cell_ids
            .iter()
            .zip(&other.cell_ids)
            .position(|(a, b)| a != b)
        {
            return Err(GridError::CellMismatch {
                index,
                expected: self.cell_ids[index].clone(),
                got: other.cell_ids[index].clone(),
            });
        }
        Ok(())
    }

    /// Check that a per-cell slice has one entry per cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Alignment`] naming `what` on mismatch.
    pub fn check_len(&self, len: usize, what: &str) -> Result<(), GridError> {
        if len != self.n_cells() {
            return Err(GridError::Alignment {
                what: what.to_string(),
                expected: self.n_cells(),
                got: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_duplicates() {
        let err = Grid::new(["1", "2", "1"]).unwrap_err();
        assert_eq!(
            err,
            GridError::DuplicateCell {
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn new_rejects_empty() {
        let ids: [&str; 0] = [];
        assert!(matches!(
            Grid::new(ids),
            Err(GridError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn sequential_ids() {
        let g = Grid::sequential(3).unwrap();
        assert_eq!(g.cell_ids(), &["0", "1", "2"]);
        assert_eq!(g.index_of("2"), Some(2));
        assert_eq!(g.cell_id(5), None);
    }

    #[test]
    fn coordinates_length_checked() {
        let g = Grid::sequential(2).unwrap();
        let err = g.with_coordinates(vec![1.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, GridError::Alignment { expected: 2, got: 1, .. }));
    }

    #[test]
    fn coordinates_accessible() {
        let g = Grid::sequential(2)
            .unwrap()
            .with_coordinates(vec![10.0, 11.0], vec![20.0, 21.0])
            .unwrap();
        assert_eq!(g.lats(), Some([10.0, 11.0].as_slice()));
        assert_eq!(g.lons(), Some([20.0, 21.0].as_slice()));
    }

    #[test]
    fn aligned_grids_pass() {
        let a = Grid::new(["a", "b"]).unwrap();
        let b = Grid::new(["a", "b"])
            .unwrap()
            .with_coordinates(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap();
        assert!(a.check_aligned(&b, "projection").is_ok());
    }

    #[test]
    fn misaligned_count() {
        let a = Grid::sequential(3).unwrap();
        let b = Grid::sequential(2).unwrap();
        assert!(matches!(
            a.check_aligned(&b, "projection"),
            Err(GridError::Alignment {
                expected: 3,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn misaligned_order() {
        let a = Grid::new(["a", "b"]).unwrap();
        let b = Grid::new(["b", "a"]).unwrap();
        assert!(matches!(
            a.check_aligned(&b, "projection"),
            Err(GridError::CellMismatch { index: 0, .. })
        ));
    }
}
