//! CSV writers for stage results.
//!
//! Every table starts with the `FID` column in grid order. Absent values
//! are written as empty fields.

use std::path::Path;

use heatrisk_grid::{CellGroups, Grid};
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_mortality::ExcessDeaths;
use heatrisk_threshold::ThresholdGrid;
use heatrisk_warning::{AgeBand, AvertedDeaths, BandOutcome, ByBand};
use tracing::info;

use crate::error::IoError;
use crate::table::FID;

/// One output column: header plus one optional value per cell.
struct Column {
    name: String,
    values: Vec<Option<String>>,
}

fn write_columns(path: &Path, grid: &Grid, columns: &[Column]) -> Result<(), IoError> {
    let mut wtr = csv::Writer::from_path(path).map_err(IoError::csv(path))?;

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(FID);
    header.extend(columns.iter().map(|c| c.name.as_str()));
    wtr.write_record(&header).map_err(IoError::csv(path))?;

    for (cell, id) in grid.cell_ids().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(id.as_str());
        record.extend(
            columns
                .iter()
                .map(|c| c.values[cell].as_deref().unwrap_or_default()),
        );
        wtr.write_record(&record).map_err(IoError::csv(path))?;
    }

    wtr.flush().map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), n_cells = grid.n_cells(), n_columns = columns.len(), "wrote table");
    Ok(())
}

/// One column per group, named `<prefix><scenario>_<year>`.
fn group_columns<T, F>(groups: &CellGroups<T>, prefix: &str, value: F) -> Vec<Column>
where
    F: Fn(&T) -> String,
{
    groups
        .iter()
        .map(|(key, cells)| Column {
            name: format!("{prefix}{key}"),
            values: cells.iter().map(|v| v.as_ref().map(&value)).collect(),
        })
        .collect()
}

/// Writes thresholds as `FID,<column>`.
pub fn write_thresholds(path: &Path, thresholds: &ThresholdGrid, column: &str) -> Result<(), IoError> {
    let col = Column {
        name: column.to_string(),
        values: thresholds
            .thresholds()
            .iter()
            .map(|t| t.map(|v| v.to_string()))
            .collect(),
    };
    write_columns(path, thresholds.grid(), &[col])
}

/// Writes heatwave day counts as `FID,<scenario>_<year>,...`.
pub fn write_heatwave_days(path: &Path, counts: &HeatwaveDays) -> Result<(), IoError> {
    let columns = group_columns(counts.counts(), "", |c| c.days().to_string());
    write_columns(path, counts.grid(), &columns)
}

/// Writes excess deaths as `FID,ED_<scenario>_<year>,...`.
pub fn write_excess_deaths(path: &Path, excess: &ExcessDeaths) -> Result<(), IoError> {
    let columns = group_columns(excess.deaths(), "ED_", f64::to_string);
    write_columns(path, excess.grid(), &columns)
}

/// Writes averted deaths per band.
///
/// For each band and group three columns are written:
/// `<band>_excess_<scenario>_<year>`, `<band>_warned_<scenario>_<year>` and
/// `<band>_averted_<scenario>_<year>`.
pub fn write_averted_deaths(path: &Path, averted: &AvertedDeaths) -> Result<(), IoError> {
    let mut columns = Vec::new();
    for band in AgeBand::ALL {
        let groups = averted.band(band);
        let label = band.label();
        columns.extend(group_columns(groups, &format!("{label}_excess_"), |o: &BandOutcome| {
            o.excess_without().to_string()
        }));
        columns.extend(group_columns(groups, &format!("{label}_warned_"), |o: &BandOutcome| {
            o.excess_with().to_string()
        }));
        columns.extend(group_columns(groups, &format!("{label}_averted_"), |o: &BandOutcome| {
            o.averted().to_string()
        }));
    }
    write_columns(path, averted.grid(), &columns)
}

/// Writes rate-based benefits as `FID,<band>_benefit_<scenario>_<year>,...`.
pub fn write_rate_benefit(path: &Path, benefit: &ByBand<CellGroups<f64>>) -> Result<(), IoError> {
    let mut columns = Vec::new();
    for (band, groups) in benefit.iter() {
        columns.extend(group_columns(
            groups,
            &format!("{}_benefit_", band.label()),
            f64::to_string,
        ));
    }
    write_columns(path, benefit.get(AgeBand::Over65).grid(), &columns)
}
