//! Error types for the heatrisk-mortality crate.

use heatrisk_grid::{ErrorKind, GridError};

/// Error type for all fallible operations in the heatrisk-mortality crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MortalityError {
    /// Returned when exposure inputs are not on the heatwave count grid, or
    /// paired per-cell inputs differ in length.
    #[error("mortality inputs are not aligned: {source}")]
    Alignment {
        /// The underlying grid mismatch.
        source: GridError,
    },

    /// Returned when an exposure table has no values for a counted year.
    #[error("no {what} for year {year}")]
    MissingYear {
        /// Which quantity is missing (`population` or `mortality rate`).
        what: &'static str,
        /// The year without values.
        year: i32,
    },

    /// Returned when a configuration value or exogenous parameter is out of
    /// domain.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },
}

impl MortalityError {
    /// Maps this error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MortalityError::Alignment { .. } | MortalityError::MissingYear { .. } => {
                ErrorKind::Alignment
            }
            MortalityError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }
}

impl From<GridError> for MortalityError {
    fn from(e: GridError) -> Self {
        match e.kind() {
            ErrorKind::Alignment => MortalityError::Alignment { source: e },
            _ => MortalityError::InvalidParameter {
                reason: e.to_string(),
            },
        }
    }
}
