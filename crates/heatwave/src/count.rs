//! Per-cell exceedance counting.

use crate::config::CounterConfig;
use crate::result::DayCount;

/// Counts exceedances of `threshold` in one cell-year slice.
///
/// Missing readings are not exceedances; they only lower `valid_days`.
pub(crate) fn count_exceedances(days: &[f64], threshold: f64, config: &CounterConfig) -> DayCount {
    let comparator = config.comparator();
    let mut exceed = 0u32;
    let mut valid = 0u32;
    for &t in days {
        if !config.is_valid_reading(t) {
            continue;
        }
        valid += 1;
        if comparator.exceeds(t, threshold) {
            exceed += 1;
        }
    }
    DayCount::observed(exceed, valid, days.len() as u32)
}
