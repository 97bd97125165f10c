//! Typed readers for the pipeline's CSV tables.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use heatrisk_grid::{DailyField, Grid, GroupKey};
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_threshold::ThresholdGrid;
use tracing::info;

use crate::error::IoError;
use crate::table::{RawTable, parse_optional_f64};

/// Default name of the threshold column.
pub const THRESHOLD_COLUMN: &str = "Percent975";

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Options shared by the readers.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Value that marks a missing reading in addition to blanks, `NA` and
    /// `NaN`.
    missing_sentinel: Option<f64>,
    /// Column holding thresholds in a threshold table.
    threshold_column: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            missing_sentinel: None,
            threshold_column: THRESHOLD_COLUMN.into(),
        }
    }
}

impl ReaderConfig {
    /// Sets the missing-value sentinel.
    pub fn with_missing_sentinel(mut self, sentinel: Option<f64>) -> Self {
        self.missing_sentinel = sentinel;
        self
    }

    /// Sets the threshold column name.
    pub fn with_threshold_column(mut self, name: impl Into<String>) -> Self {
        self.threshold_column = name.into();
        self
    }

    /// Returns the missing-value sentinel.
    pub fn missing_sentinel(&self) -> Option<f64> {
        self.missing_sentinel
    }

    /// Returns the threshold column name.
    pub fn threshold_column(&self) -> &str {
        &self.threshold_column
    }
}

// ---------------------------------------------------------------------------
// Daily temperatures
// ---------------------------------------------------------------------------

/// Reads a daily temperature table.
///
/// Layout: `FID`, then one column per day named by its ISO date
/// (`YYYY-MM-DD`), one row per cell. Optional `lat` and `lon` columns
/// attach coordinates to the grid. Missing readings become `NaN`.
///
/// # Errors
///
/// Returns [`IoError::InvalidHeader`] for a column that is neither a date
/// nor a coordinate, [`IoError::InvalidValue`] for an unparseable field and
/// [`IoError::Grid`] for duplicate ids or unsorted dates.
pub fn read_daily_csv(path: &Path, config: &ReaderConfig) -> Result<DailyField, IoError> {
    let table = RawTable::read(path)?;

    let mut day_columns = Vec::new();
    let mut dates = Vec::new();
    let mut lat_col = None;
    let mut lon_col = None;
    for (i, name) in table.columns().iter().enumerate() {
        match name.to_ascii_lowercase().as_str() {
            "lat" | "latitude" => lat_col = Some(i),
            "lon" | "longitude" => lon_col = Some(i),
            _ => {
                let date = NaiveDate::parse_from_str(name, "%Y-%m-%d").map_err(|e| {
                    IoError::InvalidHeader {
                        column: name.clone(),
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    }
                })?;
                day_columns.push(i);
                dates.push(date);
            }
        }
    }

    let mut grid = table.grid()?;
    if let (Some(lat), Some(lon)) = (lat_col, lon_col) {
        let lats = table.column(lat, |f| f.parse::<f64>().ok())?;
        let lons = table.column(lon, |f| f.parse::<f64>().ok())?;
        grid = grid
            .with_coordinates(lats, lons)
            .map_err(IoError::grid(path))?;
    }

    let sentinel = config.missing_sentinel();
    let per_day: Vec<Vec<f64>> = day_columns
        .iter()
        .map(|&col| {
            table.column(col, |f| {
                parse_optional_f64(f, sentinel).map(|v| v.unwrap_or(f64::NAN))
            })
        })
        .collect::<Result<_, _>>()?;

    let n_cells = grid.n_cells();
    let n_days = dates.len();
    let mut values = Vec::with_capacity(n_cells * n_days);
    for cell in 0..n_cells {
        values.extend(per_day.iter().map(|day| day[cell]));
    }

    let field = DailyField::new(grid, dates, values).map_err(IoError::grid(path))?;
    info!(path = %path.display(), n_cells, n_days, "read daily temperatures");
    Ok(field)
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Reads a threshold table (`FID,<threshold column>`).
///
/// Blank fields mark cells without a threshold.
pub fn read_thresholds(path: &Path, config: &ReaderConfig) -> Result<ThresholdGrid, IoError> {
    let table = RawTable::read(path)?;
    let col = table.column_index(config.threshold_column())?;
    let values = table.column(col, |f| parse_optional_f64(f, None))?;
    ThresholdGrid::from_values(table.grid()?, values).map_err(IoError::data(path))
}

// ---------------------------------------------------------------------------
// Heatwave days
// ---------------------------------------------------------------------------

/// Splits a `<scenario>_<year>` column name at its last underscore.
pub(crate) fn parse_group_column(name: &str) -> Option<GroupKey> {
    let (scenario, year) = name.rsplit_once('_')?;
    if scenario.is_empty() {
        return None;
    }
    Some(GroupKey::new(scenario, year.parse().ok()?))
}

/// Parses a whole-number count; `5` and `5.0` are both accepted.
fn parse_count(field: &str) -> Option<Option<i64>> {
    let v = parse_optional_f64(field, None)?;
    match v {
        None => Some(None),
        Some(x) if x.fract() == 0.0 && x.abs() < 9.0e15 => Some(Some(x as i64)),
        Some(_) => None,
    }
}

/// Reads a heatwave-days table (`FID,<scenario>_<year>,...`).
///
/// Blank fields mark cells without a count. Counts read this way carry no
/// coverage information.
pub fn read_heatwave_days(path: &Path) -> Result<HeatwaveDays, IoError> {
    let table = RawTable::read(path)?;
    let mut groups = Vec::with_capacity(table.columns().len());
    for (i, name) in table.columns().iter().enumerate() {
        let key = parse_group_column(name).ok_or_else(|| IoError::InvalidHeader {
            column: name.clone(),
            path: path.to_path_buf(),
            reason: "expected <scenario>_<year>".to_string(),
        })?;
        groups.push((key, table.column(i, parse_count)?));
    }
    HeatwaveDays::from_counts(table.grid()?, groups).map_err(IoError::data(path))
}

// ---------------------------------------------------------------------------
// Per-year and per-cell tables
// ---------------------------------------------------------------------------

/// Per-cell values keyed by year, e.g. population by year.
#[derive(Debug, Clone)]
pub struct YearlyTable {
    grid: Grid,
    by_year: BTreeMap<i32, Vec<f64>>,
}

impl YearlyTable {
    /// The grid of the table's `FID` column.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Years present, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Values of one year.
    pub fn get(&self, year: i32) -> Option<&[f64]> {
        self.by_year.get(&year).map(Vec::as_slice)
    }

    /// Consumes the table into its grid and per-year values.
    pub fn into_parts(self) -> (Grid, BTreeMap<i32, Vec<f64>>) {
        (self.grid, self.by_year)
    }
}

/// Reads a table with one column per year named `<prefix><year>`, such as
/// `Pop65-2050`.
///
/// Columns without the prefix are ignored. Missing fields become `NaN`.
///
/// # Errors
///
/// Returns [`IoError::InvalidHeader`] when the text after the prefix is not
/// a year and [`IoError::MissingColumn`] when no column has the prefix.
pub fn read_yearly_table(path: &Path, prefix: &str) -> Result<YearlyTable, IoError> {
    let table = RawTable::read(path)?;
    let mut by_year = BTreeMap::new();
    for (i, name) in table.columns().iter().enumerate() {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };
        let year: i32 = rest.parse().map_err(|_| IoError::InvalidHeader {
            column: name.clone(),
            path: path.to_path_buf(),
            reason: format!("expected {prefix}<year>"),
        })?;
        let values = table.column(i, |f| {
            parse_optional_f64(f, None).map(|v| v.unwrap_or(f64::NAN))
        })?;
        by_year.insert(year, values);
    }

    if by_year.is_empty() {
        return Err(IoError::MissingColumn {
            name: format!("{prefix}<year>"),
            path: path.to_path_buf(),
        });
    }

    Ok(YearlyTable {
        grid: table.grid()?,
        by_year,
    })
}

/// Reads one numeric column of an `FID` table.
pub fn read_cell_column(path: &Path, column: &str) -> Result<(Grid, Vec<f64>), IoError> {
    let table = RawTable::read(path)?;
    let col = table.column_index(column)?;
    let values = table.column(col, |f| {
        parse_optional_f64(f, None).map(|v| v.unwrap_or(f64::NAN))
    })?;
    Ok((table.grid()?, values))
}
