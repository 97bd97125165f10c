//! Raw `FID`-keyed CSV tables.

use std::path::{Path, PathBuf};

use heatrisk_grid::Grid;
use tracing::debug;

use crate::error::IoError;

/// Name of the cell id column.
pub const FID: &str = "FID";

/// A CSV file whose first column is the cell id.
///
/// Fields are kept as trimmed text until a reader asks for a typed column.
#[derive(Debug)]
pub(crate) struct RawTable {
    path: PathBuf,
    ids: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Reads `path`, requiring `FID` as the first column.
    pub(crate) fn read(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(IoError::csv(path))?;

        let headers = rdr.headers().map_err(IoError::csv(path))?.clone();
        match headers.get(0) {
            Some(first) if first == FID => {}
            _ => {
                return Err(IoError::MissingColumn {
                    name: FID.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut ids = Vec::new();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(IoError::csv(path))?;
            let mut fields = record.iter();
            ids.push(fields.next().unwrap_or_default().to_string());
            rows.push(fields.map(str::to_string).collect());
        }

        debug!(path = %path.display(), n_cells = ids.len(), n_columns = columns.len(), "read table");
        Ok(Self {
            path: path.to_path_buf(),
            ids,
            columns,
            rows,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Column names after `FID`.
    pub(crate) fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Grid of the `FID` column in row order.
    pub(crate) fn grid(&self) -> Result<Grid, IoError> {
        Grid::new(self.ids.iter().cloned()).map_err(IoError::grid(&self.path))
    }

    /// Position of a named column among [`RawTable::columns`].
    pub(crate) fn column_index(&self, name: &str) -> Result<usize, IoError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }

    /// Parses every row's field in column `col` with `parse`.
    ///
    /// `parse` returns `None` for text it cannot interpret.
    pub(crate) fn column<T, F>(&self, col: usize, parse: F) -> Result<Vec<T>, IoError>
    where
        F: Fn(&str) -> Option<T>,
    {
        self.rows
            .iter()
            .zip(&self.ids)
            .map(|(row, id)| {
                let field = row[col].as_str();
                parse(field).ok_or_else(|| IoError::InvalidValue {
                    value: field.to_string(),
                    cell: id.clone(),
                    column: self.columns[col].clone(),
                    path: self.path.clone(),
                })
            })
            .collect()
    }
}

/// Whether a field denotes a missing value.
pub(crate) fn is_missing(field: &str) -> bool {
    field.is_empty() || field.eq_ignore_ascii_case("na") || field.eq_ignore_ascii_case("nan")
}

/// Parses a float, mapping missing markers (and `sentinel`) to `None`.
pub(crate) fn parse_optional_f64(field: &str, sentinel: Option<f64>) -> Option<Option<f64>> {
    if is_missing(field) {
        return Some(None);
    }
    let v: f64 = field.parse().ok()?;
    if sentinel == Some(v) || v.is_nan() {
        Some(None)
    } else {
        Some(Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_markers() {
        assert_eq!(parse_optional_f64("", None), Some(None));
        assert_eq!(parse_optional_f64("NA", None), Some(None));
        assert_eq!(parse_optional_f64("nan", None), Some(None));
        assert_eq!(parse_optional_f64("-9999", Some(-9999.0)), Some(None));
        assert_eq!(parse_optional_f64("31.5", Some(-9999.0)), Some(Some(31.5)));
        assert_eq!(parse_optional_f64("warm", None), None);
    }

    #[test]
    fn requires_fid_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "id,a\n1,2\n").unwrap();
        assert!(matches!(
            RawTable::read(&path),
            Err(IoError::MissingColumn { .. })
        ));
    }

    #[test]
    fn reads_trimmed_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "FID, a ,b\n 7 , 1.5,\n8,2,3\n").unwrap();
        let t = RawTable::read(&path).unwrap();
        assert_eq!(t.columns(), ["a", "b"]);
        assert_eq!(t.grid().unwrap().cell_ids(), ["7", "8"]);
        let b = t
            .column(t.column_index("b").unwrap(), |f| parse_optional_f64(f, None))
            .unwrap();
        assert_eq!(b, vec![None, Some(3.0)]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "FID,a,b\n1,2\n").unwrap();
        assert!(matches!(RawTable::read(&path), Err(IoError::Csv { .. })));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            RawTable::read(Path::new("/nonexistent/heatrisk.csv")),
            Err(IoError::FileNotFound { .. })
        ));
    }
}
