//! Error types for the heatrisk-heatwave crate.

use heatrisk_grid::{ErrorKind, GridError};

/// Error type for all fallible operations in the heatrisk-heatwave crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HeatwaveError {
    /// Returned when no projection is supplied.
    #[error("no projections supplied")]
    EmptyInput,

    /// Returned when a projection is not on the threshold grid.
    #[error("projection '{scenario}' is not aligned with the threshold grid: {source}")]
    Alignment {
        /// Scenario label of the projection.
        scenario: String,
        /// The underlying grid mismatch.
        source: GridError,
    },

    /// Returned when two projections of one scenario cover the same year.
    #[error("scenario '{scenario}' covers year {year} in more than one projection")]
    DuplicateGroup {
        /// Scenario label.
        scenario: String,
        /// The repeated year.
        year: i32,
    },

    /// Returned when a supplied day count is negative.
    #[error("negative heatwave day count {count} for cell {cell} in group '{group}'")]
    NegativeCount {
        /// Group label (`scenario_year`).
        group: String,
        /// Cell index.
        cell: usize,
        /// The offending count.
        count: i64,
    },

    /// Returned when a configuration value or input is invalid.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },
}

impl HeatwaveError {
    /// Maps this error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeatwaveError::Alignment { .. } => ErrorKind::Alignment,
            HeatwaveError::EmptyInput
            | HeatwaveError::DuplicateGroup { .. }
            | HeatwaveError::NegativeCount { .. }
            | HeatwaveError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }
}

impl From<GridError> for HeatwaveError {
    fn from(e: GridError) -> Self {
        match e.kind() {
            ErrorKind::Alignment => HeatwaveError::Alignment {
                scenario: String::new(),
                source: e,
            },
            _ => HeatwaveError::InvalidParameter {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_input() {
        assert_eq!(HeatwaveError::EmptyInput.to_string(), "no projections supplied");
    }

    #[test]
    fn error_alignment() {
        let e = HeatwaveError::Alignment {
            scenario: "ssp585".to_string(),
            source: GridError::Alignment {
                what: "projection cell count".to_string(),
                expected: 10,
                got: 12,
            },
        };
        assert_eq!(
            e.to_string(),
            "projection 'ssp585' is not aligned with the threshold grid: \
             alignment error: projection cell count expected 10, got 12"
        );
        assert_eq!(e.kind(), ErrorKind::Alignment);
    }

    #[test]
    fn error_duplicate_group() {
        let e = HeatwaveError::DuplicateGroup {
            scenario: "ssp245".to_string(),
            year: 2050,
        };
        assert_eq!(
            e.to_string(),
            "scenario 'ssp245' covers year 2050 in more than one projection"
        );
        assert_eq!(e.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn error_negative_count() {
        let e = HeatwaveError::NegativeCount {
            group: "ssp245_2050".to_string(),
            cell: 4,
            count: -2,
        };
        assert_eq!(
            e.to_string(),
            "negative heatwave day count -2 for cell 4 in group 'ssp245_2050'"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<HeatwaveError>();
    }
}
