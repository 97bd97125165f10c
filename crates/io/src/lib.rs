//! # heatrisk-io
//!
//! CSV readers and writers for the heatrisk pipeline. Every table is keyed
//! by an `FID` cell id column; row order defines the grid.
//!
//! | Table | Columns |
//! |---|---|
//! | daily temperatures | `FID`, ISO dates, optional `lat`/`lon` |
//! | thresholds | `FID`, `Percent975` |
//! | heatwave days | `FID`, `<scenario>_<year>` |
//! | per-year inputs | `FID`, `<prefix><year>` |

mod error;
mod reader;
mod table;
mod writer;

pub use error::IoError;
pub use reader::{
    ReaderConfig, THRESHOLD_COLUMN, YearlyTable, read_cell_column, read_daily_csv,
    read_heatwave_days, read_thresholds, read_yearly_table,
};
pub use table::FID;
pub use writer::{
    write_averted_deaths, write_excess_deaths, write_heatwave_days, write_rate_benefit,
    write_thresholds,
};
