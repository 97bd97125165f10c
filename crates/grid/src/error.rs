//! Error types for heatrisk-grid and the shared error taxonomy.

use std::fmt;

/// Taxonomy every heatrisk error maps onto.
///
/// Stage crates keep their own error enums; `kind()` on each of them lets a
/// caller decide between excluding a cell and aborting a run without
/// matching on crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inputs are not spatially (or structurally) aligned.
    Alignment,
    /// Too few valid samples to compute a statistic for a cell.
    InsufficientData,
    /// Out-of-domain configuration or exogenous parameter.
    InvalidParameter,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Alignment => write!(f, "alignment"),
            ErrorKind::InsufficientData => write!(f, "insufficient data"),
            ErrorKind::InvalidParameter => write!(f, "invalid parameter"),
        }
    }
}

/// Error type for all fallible operations in the heatrisk-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when two structures that must agree in size do not.
    #[error("alignment error: {what} expected {expected}, got {got}")]
    Alignment {
        /// What was being compared.
        what: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when two grids have the same size but different cell ids.
    #[error("alignment error: cell {index} is '{expected}' in the reference grid but '{got}' here")]
    CellMismatch {
        /// Position of the first differing cell.
        index: usize,
        /// Cell id in the reference grid.
        expected: String,
        /// Cell id in the compared grid.
        got: String,
    },

    /// Returned when a grid lists the same cell id twice.
    #[error("duplicate cell id '{id}'")]
    DuplicateCell {
        /// The repeated id.
        id: String,
    },

    /// Returned when a cell index is outside the grid.
    #[error("cell index {index} out of range for grid of {n_cells} cells")]
    CellOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of cells in the grid.
        n_cells: usize,
    },

    /// Returned when a structural parameter is out of domain.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },
}

impl GridError {
    /// Maps this error onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::Alignment { .. }
            | GridError::CellMismatch { .. }
            | GridError::CellOutOfRange { .. } => ErrorKind::Alignment,
            GridError::DuplicateCell { .. } | GridError::InvalidParameter { .. } => {
                ErrorKind::InvalidParameter
            }
        }
    }
}
