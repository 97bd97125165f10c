//! # heatrisk-grid
//!
//! The data model shared by every heatrisk stage: the spatial [`Grid`],
//! gridded daily temperature fields ([`DailyField`]), scenario/year
//! grouping keys ([`GroupKey`]) and per-cell result tables
//! ([`CellGroups`]).
//!
//! Every per-cell vector in the workspace is indexed by position in a
//! [`Grid`]; two inputs are spatially aligned iff their grids carry the same
//! cell ids in the same order ([`Grid::check_aligned`]).

mod error;
mod field;
mod grid;
mod groups;

pub use error::{ErrorKind, GridError};
pub use field::DailyField;
pub use grid::Grid;
pub use groups::{CellGroups, GroupKey};
