//! Result types for heatwave day counting.

use heatrisk_grid::{CellGroups, Grid, GroupKey};

use crate::config::Comparator;
use crate::error::HeatwaveError;

/// How much of a cell-year's daily record was usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every day had a valid reading.
    Complete,
    /// Some days were missing; they were counted as non-exceedance.
    Partial,
    /// No day had a valid reading. The count is zero and low-confidence.
    NoValidDays,
    /// The count was supplied by the caller; day coverage is unknown.
    Supplied,
}

/// Heatwave days of one cell in one (scenario, year) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    days: u32,
    valid_days: u32,
    total_days: u32,
    coverage: Coverage,
}

impl DayCount {
    /// Creates a count from an observed record.
    pub(crate) fn observed(days: u32, valid_days: u32, total_days: u32) -> Self {
        let coverage = if valid_days == 0 {
            Coverage::NoValidDays
        } else if valid_days < total_days {
            Coverage::Partial
        } else {
            Coverage::Complete
        };
        Self {
            days,
            valid_days,
            total_days,
            coverage,
        }
    }

    /// Creates a count supplied by the caller.
    pub fn supplied(days: u32) -> Self {
        Self {
            days,
            valid_days: 0,
            total_days: 0,
            coverage: Coverage::Supplied,
        }
    }

    /// Number of exceedance days.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Days with a valid reading (0 for supplied counts).
    pub fn valid_days(&self) -> u32 {
        self.valid_days
    }

    /// Days on the date axis for this year (0 for supplied counts).
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Coverage classification.
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Whether the count rests on no valid data at all.
    pub fn is_low_confidence(&self) -> bool {
        self.coverage == Coverage::NoValidDays
    }
}

/// Heatwave day counts per (scenario, year) group and grid cell.
///
/// A cell with no threshold has no count (`None`) in every group.
#[derive(Debug, Clone)]
pub struct HeatwaveDays {
    counts: CellGroups<DayCount>,
    comparator: Option<Comparator>,
}

impl HeatwaveDays {
    pub(crate) fn new(counts: CellGroups<DayCount>, comparator: Comparator) -> Self {
        Self {
            counts,
            comparator: Some(comparator),
        }
    }

    /// Wrap counts computed elsewhere so downstream stages can run on
    /// their own.
    ///
    /// Each group supplies one entry per grid cell; `None` marks a cell
    /// without a count.
    ///
    /// # Errors
    ///
    /// Returns [`HeatwaveError::NegativeCount`] for any negative count,
    /// [`HeatwaveError::Alignment`] if a group does not have one entry per
    /// cell, and [`HeatwaveError::InvalidParameter`] for a repeated group or
    /// a count that does not fit in `u32`.
    pub fn from_counts<I>(grid: Grid, groups: I) -> Result<Self, HeatwaveError>
    where
        I: IntoIterator<Item = (GroupKey, Vec<Option<i64>>)>,
    {
        let mut counts = CellGroups::new(grid);
        for (key, cells) in groups {
            let mut converted = Vec::with_capacity(cells.len());
            for (cell, count) in cells.into_iter().enumerate() {
                let Some(count) = count else {
                    converted.push(None);
                    continue;
                };
                if count < 0 {
                    return Err(HeatwaveError::NegativeCount {
                        group: key.to_string(),
                        cell,
                        count,
                    });
                }
                let days = u32::try_from(count).map_err(|_| HeatwaveError::InvalidParameter {
                    reason: format!("day count {count} for cell {cell} is out of range"),
                })?;
                converted.push(Some(DayCount::supplied(days)));
            }
            counts.insert(key, converted)?;
        }
        Ok(Self {
            counts,
            comparator: None,
        })
    }

    /// The per-group, per-cell counts.
    pub fn counts(&self) -> &CellGroups<DayCount> {
        &self.counts
    }

    /// The grid the counts are aligned to.
    pub fn grid(&self) -> &Grid {
        self.counts.grid()
    }

    /// Comparator used, or `None` for supplied counts.
    pub fn comparator(&self) -> Option<Comparator> {
        self.comparator
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.counts.keys()
    }

    /// Count record of one cell in one group.
    pub fn get(&self, key: &GroupKey, cell: usize) -> Option<&DayCount> {
        self.counts.cell(key, cell)
    }

    /// Exceedance days of one cell in one group.
    pub fn days(&self, key: &GroupKey, cell: usize) -> Option<u32> {
        self.get(key, cell).map(DayCount::days)
    }

    /// Every (group, cell) whose count rests on no valid data.
    pub fn low_confidence(&self) -> Vec<(GroupKey, usize)> {
        self.counts
            .iter()
            .flat_map(|(key, cells)| {
                cells.iter().enumerate().filter_map(move |(i, c)| {
                    c.filter(DayCount::is_low_confidence)
                        .map(|_| (key.clone(), i))
                })
            })
            .collect()
    }
}
