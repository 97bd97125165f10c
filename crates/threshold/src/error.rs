//! Error types for the heatrisk-threshold crate.

use heatrisk_grid::{ErrorKind, GridError};

/// Error type for all fallible operations in the heatrisk-threshold crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ThresholdError {
    /// Returned when no baseline dataset is supplied.
    #[error("no baseline datasets supplied")]
    EmptyInput,

    /// Returned when a baseline dataset is not on the same grid as the first.
    #[error("baseline dataset {dataset} is not aligned with dataset 0: {source}")]
    Alignment {
        /// Index of the misaligned dataset.
        dataset: usize,
        /// The underlying grid mismatch.
        source: GridError,
    },

    /// Returned when a cell has fewer valid pooled samples than required.
    #[error("cell {cell} ('{cell_id}') has {valid} valid samples, {required} required")]
    InsufficientData {
        /// Index of the cell.
        cell: usize,
        /// Id of the cell.
        cell_id: String,
        /// Valid samples after excluding missing readings.
        valid: usize,
        /// Configured minimum.
        required: usize,
    },

    /// Returned when a configuration value or supplied threshold is invalid.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },
}

impl ThresholdError {
    /// Maps this error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThresholdError::Alignment { .. } => ErrorKind::Alignment,
            ThresholdError::InsufficientData { .. } => ErrorKind::InsufficientData,
            ThresholdError::EmptyInput | ThresholdError::InvalidParameter { .. } => {
                ErrorKind::InvalidParameter
            }
        }
    }
}

impl From<GridError> for ThresholdError {
    fn from(e: GridError) -> Self {
        match e.kind() {
            ErrorKind::Alignment => ThresholdError::Alignment {
                dataset: 0,
                source: e,
            },
            _ => ThresholdError::InvalidParameter {
                reason: e.to_string(),
            },
        }
    }
}
