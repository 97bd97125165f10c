//! Error types for heatrisk-io.

use std::path::{Path, PathBuf};

use heatrisk_grid::GridError;

/// Error type for all fallible operations in the heatrisk-io crate.
///
/// Every variant carries the path of the file being read or written.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the CSV reader or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being processed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a required column is absent.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// File that was inspected.
        path: PathBuf,
    },

    /// Returned when a column name cannot be interpreted.
    #[error("invalid column '{column}' in {}: {reason}", path.display())]
    InvalidHeader {
        /// The offending column name.
        column: String,
        /// File that was inspected.
        path: PathBuf,
        /// Why the name was rejected.
        reason: String,
    },

    /// Returned when a field cannot be parsed.
    #[error("invalid value '{value}' for cell '{cell}', column '{column}' in {}", path.display())]
    InvalidValue {
        /// The raw field text.
        value: String,
        /// Cell id of the row.
        cell: String,
        /// Column name.
        column: String,
        /// File that was inspected.
        path: PathBuf,
    },

    /// Returned when file contents do not form a valid grid or table.
    #[error("invalid table in {}: {source}", path.display())]
    Grid {
        /// File that was inspected.
        path: PathBuf,
        /// The underlying structural problem.
        source: GridError,
    },

    /// Returned when parsed values are rejected by a stage type.
    #[error("invalid data in {}: {reason}", path.display())]
    Data {
        /// File that was inspected.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },
}

impl IoError {
    pub(crate) fn csv(path: &Path) -> impl Fn(csv::Error) -> IoError + '_ {
        move |e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }

    pub(crate) fn grid(path: &Path) -> impl Fn(GridError) -> IoError + '_ {
        move |source| IoError::Grid {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn data<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> IoError + '_ {
        move |e| IoError::Data {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}
