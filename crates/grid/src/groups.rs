//! Scenario/year grouping keys and per-cell tables keyed by them.

use std::collections::BTreeMap;
use std::fmt;

use heatrisk_stats::neumaier_sum;

use crate::error::GridError;
use crate::grid::Grid;

// ---------------------------------------------------------------------------
// GroupKey
// ---------------------------------------------------------------------------

/// A (scenario, year) grouping of a projection.
///
/// Ordered by scenario label, then year. Scenario labels are opaque to the
/// pipeline; counts for different labels are never merged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    scenario: String,
    year: i32,
}

impl GroupKey {
    /// Create a key.
    pub fn new(scenario: impl Into<String>, year: i32) -> Self {
        Self {
            scenario: scenario.into(),
            year,
        }
    }

    /// Scenario label.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.scenario, self.year)
    }
}

// ---------------------------------------------------------------------------
// CellGroups
// ---------------------------------------------------------------------------

/// Per-cell values for each [`GroupKey`], aligned to one [`Grid`].
///
/// `None` marks a cell with no value in that group (for example a cell whose
/// threshold was excluded upstream). It is never a stand-in for zero.
#[derive(Debug, Clone)]
pub struct CellGroups<T> {
    grid: Grid,
    groups: BTreeMap<GroupKey, Vec<Option<T>>>,
}

impl<T> CellGroups<T> {
    /// Create an empty table over `grid`.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            groups: BTreeMap::new(),
        }
    }

    /// Insert the per-cell values of one group.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Alignment`] if `cells` does not have one entry
    /// per grid cell and [`GridError::InvalidParameter`] if `key` is already
    /// present.
    pub fn insert(&mut self, key: GroupKey, cells: Vec<Option<T>>) -> Result<(), GridError> {
        self.grid.check_len(cells.len(), "cells in group")?;
        if self.groups.contains_key(&key) {
            return Err(GridError::InvalidParameter {
                reason: format!("group '{key}' inserted twice"),
            });
        }
        self.groups.insert(key, cells);
        Ok(())
    }

    /// The grid all groups are aligned to.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Per-cell values of one group.
    pub fn get(&self, key: &GroupKey) -> Option<&[Option<T>]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Value of one cell in one group, if present.
    pub fn cell(&self, key: &GroupKey, cell: usize) -> Option<&T> {
        self.groups.get(key)?.get(cell)?.as_ref()
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Iterator over `(key, per-cell values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[Option<T>])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Distinct scenario labels in order.
    pub fn scenarios(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for key in self.groups.keys() {
            if out.last() != Some(&key.scenario()) {
                out.push(key.scenario());
            }
        }
        out
    }

    /// Build a new table by applying `f` to every present cell value.
    ///
    /// Absent cells stay absent. Stops at the first error.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<CellGroups<U>, E>
    where
        F: FnMut(&GroupKey, usize, &T) -> Result<U, E>,
    {
        let mut groups = BTreeMap::new();
        for (key, cells) in &self.groups {
            let mapped = cells
                .iter()
                .enumerate()
                .map(|(i, v)| v.as_ref().map(|v| f(key, i, v)).transpose())
                .collect::<Result<Vec<_>, E>>()?;
            groups.insert(key.clone(), mapped);
        }
        Ok(CellGroups {
            grid: self.grid.clone(),
            groups,
        })
    }

    /// Sum a quantity over a region of cells within one group.
    ///
    /// The cell list is sorted and de-duplicated before summing with
    /// compensated summation, so the total does not depend on the order in
    /// which the caller lists cells. Absent cells contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] for an unknown group and
    /// [`GridError::CellOutOfRange`] for an index outside the grid.
    pub fn region_sum<F>(&self, key: &GroupKey, cells: &[usize], value: F) -> Result<f64, GridError>
    where
        F: Fn(&T) -> f64,
    {
        let values = self
            .groups
            .get(key)
            .ok_or_else(|| GridError::InvalidParameter {
                reason: format!("unknown group '{key}'"),
            })?;

        let mut region = cells.to_vec();
        region.sort_unstable();
        region.dedup();
        if let Some(&index) = region.last()
            && index >= self.grid.n_cells()
        {
            return Err(GridError::CellOutOfRange {
                index,
                n_cells: self.grid.n_cells(),
            });
        }

        Ok(neumaier_sum(
            region
                .iter()
                .filter_map(|&i| values[i].as_ref())
                .map(&value),
        ))
    }

    /// Sum a quantity over every cell of each group.
    pub fn totals<F>(&self, value: F) -> BTreeMap<GroupKey, f64>
    where
        F: Fn(&T) -> f64,
    {
        self.groups
            .iter()
            .map(|(k, cells)| {
                let total = neumaier_sum(cells.iter().flatten().map(&value));
                (k.clone(), total)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CellGroups<f64> {
        let mut t = CellGroups::new(Grid::sequential(3).unwrap());
        t.insert(GroupKey::new("ssp245", 2050), vec![Some(1.0), None, Some(2.5)])
            .unwrap();
        t.insert(GroupKey::new("ssp126", 2050), vec![Some(0.5); 3])
            .unwrap();
        t
    }

    #[test]
    fn key_display_and_order() {
        let a = GroupKey::new("ssp126", 2060);
        let b = GroupKey::new("ssp245", 2050);
        assert!(a < b);
        assert_eq!(b.to_string(), "ssp245_2050");
    }

    #[test]
    fn insert_checks_length() {
        let mut t: CellGroups<f64> = CellGroups::new(Grid::sequential(3).unwrap());
        let err = t.insert(GroupKey::new("s", 2050), vec![Some(1.0)]).unwrap_err();
        assert!(matches!(err, GridError::Alignment { expected: 3, got: 1, .. }));
    }

    #[test]
    fn insert_rejects_duplicate_group() {
        let mut t = table();
        let err = t
            .insert(GroupKey::new("ssp245", 2050), vec![None, None, None])
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidParameter { .. }));
    }

    #[test]
    fn scenarios_are_distinct_and_sorted() {
        assert_eq!(table().scenarios(), vec!["ssp126", "ssp245"]);
    }

    #[test]
    fn cell_lookup() {
        let t = table();
        let k = GroupKey::new("ssp245", 2050);
        assert_eq!(t.cell(&k, 2), Some(&2.5));
        assert_eq!(t.cell(&k, 1), None);
        assert_eq!(t.cell(&GroupKey::new("x", 1), 0), None);
    }

    #[test]
    fn region_sum_skips_absent_and_duplicates() {
        let t = table();
        let k = GroupKey::new("ssp245", 2050);
        let total = t.region_sum(&k, &[2, 1, 0, 2], |v| *v).unwrap();
        assert_eq!(total, 3.5);
    }

    #[test]
    fn region_sum_out_of_range() {
        let t = table();
        let k = GroupKey::new("ssp245", 2050);
        assert!(matches!(
            t.region_sum(&k, &[0, 3], |v| *v),
            Err(GridError::CellOutOfRange { index: 3, n_cells: 3 })
        ));
    }

    #[test]
    fn region_sum_unknown_group() {
        let t = table();
        assert!(t.region_sum(&GroupKey::new("x", 1), &[0], |v| *v).is_err());
    }

    #[test]
    fn totals_per_group() {
        let totals = table().totals(|v| *v);
        assert_eq!(totals[&GroupKey::new("ssp245", 2050)], 3.5);
        assert_eq!(totals[&GroupKey::new("ssp126", 2050)], 1.5);
    }

    #[test]
    fn try_map_preserves_absence() {
        let t = table();
        let doubled: CellGroups<f64> = t
            .try_map(|_, _, v| Ok::<_, GridError>(v * 2.0))
            .unwrap();
        let k = GroupKey::new("ssp245", 2050);
        assert_eq!(doubled.get(&k).unwrap(), &[Some(2.0), None, Some(5.0)]);
    }

    #[test]
    fn try_map_propagates_error() {
        let t = table();
        let res: Result<CellGroups<f64>, &str> =
            t.try_map(|_, i, v| if i == 2 { Err("boom") } else { Ok(*v) });
        assert_eq!(res.unwrap_err(), "boom");
    }
}
