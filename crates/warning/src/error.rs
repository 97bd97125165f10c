//! Error types for the heatrisk-warning crate.

use heatrisk_grid::{ErrorKind, GridError};
use heatrisk_mortality::MortalityError;

use crate::band::AgeBand;

/// Error type for all fallible operations in the heatrisk-warning crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WarningError {
    /// Returned when a band's inputs are not on the heatwave count grid.
    #[error("{band} inputs are not aligned with the heatwave counts: {source}")]
    Alignment {
        /// The band whose inputs are misaligned.
        band: AgeBand,
        /// The underlying grid mismatch.
        source: GridError,
    },

    /// Returned when excess deaths cannot be computed for a band.
    #[error("{band}: {source}")]
    Band {
        /// The band being estimated.
        band: AgeBand,
        /// The underlying mortality error.
        source: MortalityError,
    },

    /// Returned when a configuration value is out of domain.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },
}

impl WarningError {
    /// Maps this error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WarningError::Alignment { .. } => ErrorKind::Alignment,
            WarningError::Band { source, .. } => source.kind(),
            WarningError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }

    pub(crate) fn in_band(band: AgeBand) -> impl Fn(MortalityError) -> WarningError {
        move |source| match source {
            MortalityError::Alignment { source } => WarningError::Alignment { band, source },
            source => WarningError::Band { band, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_band_wraps_mortality() {
        let e = WarningError::in_band(AgeBand::Under65)(MortalityError::MissingYear {
            what: "population",
            year: 2040,
        });
        assert_eq!(e.to_string(), "under65: no population for year 2040");
        assert_eq!(e.kind(), ErrorKind::Alignment);
    }

    #[test]
    fn error_alignment_is_lifted() {
        let e = WarningError::in_band(AgeBand::Over65)(MortalityError::Alignment {
            source: GridError::Alignment {
                what: "exposure table cell count".to_string(),
                expected: 3,
                got: 4,
            },
        });
        assert_eq!(
            e.to_string(),
            "over65 inputs are not aligned with the heatwave counts: \
             alignment error: exposure table cell count expected 3, got 4"
        );
        assert_eq!(e.kind(), ErrorKind::Alignment);
    }

    #[test]
    fn error_invalid_parameter() {
        let e = WarningError::InvalidParameter {
            reason: "risk_reduction_over65 must be within 0..=1, got 1.5".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid parameter: risk_reduction_over65 must be within 0..=1, got 1.5"
        );
        assert_eq!(e.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<WarningError>();
    }
}
