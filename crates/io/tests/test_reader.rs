//! Integration tests for the CSV readers.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use heatrisk_grid::GroupKey;
use heatrisk_heatwave::Coverage;
use heatrisk_io::{
    IoError, ReaderConfig, read_cell_column, read_daily_csv, read_heatwave_days,
    read_thresholds, read_yearly_table,
};

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

#[test]
fn daily_table_is_cell_major() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(
        &dir,
        "tas.csv",
        "FID,2050-07-01,2050-07-02,2050-07-03\n\
         101,30.5,31.0,\n\
         102,NA,-9999,29.0\n",
    );
    let config = ReaderConfig::default().with_missing_sentinel(Some(-9999.0));
    let field = read_daily_csv(&path, &config).expect("read succeeds");

    assert_eq!(field.grid().cell_ids(), ["101", "102"]);
    assert_eq!(field.n_days(), 3);
    assert_relative_eq!(field.cell(0)[1], 31.0);
    assert!(field.cell(0)[2].is_nan());
    assert!(field.cell(1)[0].is_nan());
    assert!(field.cell(1)[1].is_nan());
    assert_relative_eq!(field.cell(1)[2], 29.0);
}

#[test]
fn daily_table_reads_coordinates() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(
        &dir,
        "tas.csv",
        "FID,lat,lon,2050-07-01\n1,47.5,8.25,30\n2,46.0,9.0,31\n",
    );
    let field = read_daily_csv(&path, &ReaderConfig::default()).expect("read succeeds");
    assert_eq!(field.grid().lats(), Some(&[47.5, 46.0][..]));
    assert_eq!(field.grid().lons(), Some(&[8.25, 9.0][..]));
    assert_eq!(field.n_days(), 1);
}

#[test]
fn daily_table_rejects_bad_header() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "tas.csv", "FID,July1\n1,30\n");
    let err = read_daily_csv(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::InvalidHeader { .. }), "{err}");
}

#[test]
fn daily_table_rejects_bad_value() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "tas.csv", "FID,2050-07-01\n1,hot\n");
    let err = read_daily_csv(&path, &ReaderConfig::default()).unwrap_err();
    match err {
        IoError::InvalidValue { value, cell, .. } => {
            assert_eq!(value, "hot");
            assert_eq!(cell, "1");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn daily_table_rejects_duplicate_ids() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "tas.csv", "FID,2050-07-01\n1,30\n1,31\n");
    let err = read_daily_csv(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Grid { .. }));
}

#[test]
fn thresholds_with_blank_cells() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "thr.csv", "FID,Percent975\n1,31.25\n2,\n");
    let thr = read_thresholds(&path, &ReaderConfig::default()).expect("read succeeds");
    assert_eq!(thr.get(0), Some(31.25));
    assert_eq!(thr.get(1), None);

    let err = read_thresholds(
        &path,
        &ReaderConfig::default().with_threshold_column("P95"),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::MissingColumn { .. }));
}

#[test]
fn heatwave_days_table() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(
        &dir,
        "hw.csv",
        "FID,ssp245_2050,ssp585_2050\n1,5,12\n2,,3.0\n",
    );
    let hw = read_heatwave_days(&path).expect("read succeeds");
    assert_eq!(hw.days(&GroupKey::new("ssp245", 2050), 0), Some(5));
    assert_eq!(hw.days(&GroupKey::new("ssp245", 2050), 1), None);
    assert_eq!(hw.days(&GroupKey::new("ssp585", 2050), 1), Some(3));
    assert_eq!(
        hw.get(&GroupKey::new("ssp585", 2050), 0).map(|c| c.coverage()),
        Some(Coverage::Supplied)
    );
}

#[test]
fn heatwave_days_rejects_negative_counts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "hw.csv", "FID,ssp245_2050\n1,-1\n");
    let err = read_heatwave_days(&path).unwrap_err();
    assert!(matches!(err, IoError::Data { .. }));
}

#[test]
fn yearly_table_by_prefix() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(
        &dir,
        "pop65.csv",
        "FID,Name,Pop65-2050,Pop65-2060\n1,north,1000,1100\n2,south,2000,\n",
    );
    let table = read_yearly_table(&path, "Pop65-").expect("read succeeds");
    assert_eq!(table.years().collect::<Vec<_>>(), vec![2050, 2060]);
    assert_eq!(table.get(2050), Some(&[1000.0, 2000.0][..]));
    assert!(table.get(2060).unwrap()[1].is_nan());

    let err = read_yearly_table(&path, "PopU65-").unwrap_err();
    assert!(matches!(err, IoError::MissingColumn { .. }));
}

#[test]
fn cell_column() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write(&dir, "rate.csv", "FID,MortalityRate\n7,0.008\n9,0.011\n");
    let (grid, values) = read_cell_column(&path, "MortalityRate").expect("read succeeds");
    assert_eq!(grid.cell_ids(), ["7", "9"]);
    assert_eq!(values, vec![0.008, 0.011]);
}
