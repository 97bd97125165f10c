//! Per-cell pooling of baseline samples.

use heatrisk_grid::DailyField;
use heatrisk_stats::{percentile, sort_ascending};

use crate::config::ThresholdConfig;

/// Outcome for one cell: the percentile (if enough data) and the pooled
/// valid-sample count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellEstimate {
    pub(crate) threshold: Option<f64>,
    pub(crate) valid: usize,
}

/// Pools every valid reading of `cell` across all datasets.
///
/// Values from all datasets go into one sample; duplicates keep their
/// multiplicity.
pub(crate) fn pooled_sample(datasets: &[DailyField], cell: usize, config: &ThresholdConfig) -> Vec<f64> {
    datasets
        .iter()
        .flat_map(|d| d.cell(cell).iter().copied())
        .filter(|&v| config.is_valid_reading(v))
        .collect()
}

/// Computes the configured percentile of the pooled sample of one cell.
pub(crate) fn estimate_cell(datasets: &[DailyField], cell: usize, config: &ThresholdConfig) -> CellEstimate {
    let mut sample = pooled_sample(datasets, cell, config);
    let valid = sample.len();
    if valid < config.min_valid_days() {
        return CellEstimate {
            threshold: None,
            valid,
        };
    }
    sort_ascending(&mut sample);
    CellEstimate {
        threshold: Some(percentile(&sample, config.percentile())),
        valid,
    }
}
