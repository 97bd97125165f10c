//! Integration tests: write stage results and read them back.

use std::fs;

use heatrisk_grid::{Grid, GroupKey};
use heatrisk_heatwave::HeatwaveDays;
use heatrisk_io::{
    ReaderConfig, read_heatwave_days, read_thresholds, write_averted_deaths,
    write_excess_deaths, write_heatwave_days, write_rate_benefit, write_thresholds,
};
use heatrisk_mortality::{
    ExcessConfig, ExposureTable, MortalityParams, estimate_excess_deaths,
};
use heatrisk_threshold::ThresholdGrid;
use heatrisk_warning::{
    AgeBandParams, BenefitRates, ByBand, WarningConfig, estimate_warning_benefit,
    rate_based_benefit,
};

fn counts() -> HeatwaveDays {
    let grid = Grid::new(["101", "102"]).expect("valid grid");
    HeatwaveDays::from_counts(
        grid,
        [
            (GroupKey::new("ssp245", 2050), vec![Some(5), None]),
            (GroupKey::new("ssp245", 2060), vec![Some(8), Some(2)]),
        ],
    )
    .expect("valid counts")
}

#[test]
fn thresholds_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("thr.csv");
    let grid = Grid::new(["a", "b", "c"]).expect("valid grid");
    let thr = ThresholdGrid::from_values(grid, vec![Some(30.125), None, Some(-1.5)])
        .expect("valid thresholds");

    write_thresholds(&path, &thr, "Percent975").expect("write succeeds");
    let text = fs::read_to_string(&path).expect("read text");
    assert_eq!(text, "FID,Percent975\na,30.125\nb,\nc,-1.5\n");

    let back = read_thresholds(&path, &ReaderConfig::default()).expect("read succeeds");
    assert_eq!(back.thresholds(), thr.thresholds());
    assert_eq!(back.grid().cell_ids(), thr.grid().cell_ids());
}

#[test]
fn heatwave_days_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("hw.csv");
    let hw = counts();

    write_heatwave_days(&path, &hw).expect("write succeeds");
    let text = fs::read_to_string(&path).expect("read text");
    assert_eq!(text, "FID,ssp245_2050,ssp245_2060\n101,5,8\n102,,2\n");

    let back = read_heatwave_days(&path).expect("read succeeds");
    for key in hw.keys() {
        for cell in 0..2 {
            assert_eq!(back.days(key, cell), hw.days(key, cell));
        }
    }
}

#[test]
fn excess_table_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("ed.csv");
    let hw = counts();
    let exposure =
        ExposureTable::constant(hw.grid().clone(), vec![1000.0, 500.0], vec![0.002, 0.002])
            .expect("valid exposure");
    let ed = estimate_excess_deaths(
        &hw,
        &MortalityParams::new(exposure, 0.01),
        &ExcessConfig::new(),
    )
    .expect("estimate succeeds");

    write_excess_deaths(&path, &ed).expect("write succeeds");
    let text = fs::read_to_string(&path).expect("read text");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("FID,ED_ssp245_2050,ED_ssp245_2060"));
    assert_eq!(lines.next().map(|l| l.split(',').count()), Some(3));
    assert!(text.lines().nth(2).is_some_and(|l| l.starts_with("102,,")));
}

#[test]
fn benefit_tables_keep_bands_apart() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let hw = counts();
    let grid = hw.grid().clone();
    let exposure = ExposureTable::constant(grid.clone(), vec![1000.0, 500.0], vec![0.002, 0.002])
        .expect("valid exposure");
    let params = AgeBandParams::new(
        MortalityParams::new(exposure.clone(), 0.01),
        MortalityParams::new(exposure.clone(), 0.005),
    );
    let averted = estimate_warning_benefit(
        &hw,
        &params,
        &WarningConfig::new().with_risk_reduction_over65(0.5),
    )
    .expect("estimate succeeds");

    let path = dir.path().join("averted.csv");
    write_averted_deaths(&path, &averted).expect("write succeeds");
    let text = fs::read_to_string(&path).expect("read text");
    let header = text.lines().next().expect("header");
    assert!(header.starts_with("FID,over65_excess_ssp245_2050,over65_excess_ssp245_2060,"));
    assert!(header.contains("over65_averted_ssp245_2050"));
    assert!(header.ends_with("under65_averted_ssp245_2060"));
    assert_eq!(header.split(',').count(), 1 + 2 * 3 * 2);

    let rate = rate_based_benefit(
        &hw,
        &ByBand::new(exposure.clone(), exposure),
        &BenefitRates::new(),
    )
    .expect("benefit succeeds");
    let path = dir.path().join("benefit.csv");
    write_rate_benefit(&path, &rate).expect("write succeeds");
    let text = fs::read_to_string(&path).expect("read text");
    assert_eq!(
        text.lines().next(),
        Some(
            "FID,over65_benefit_ssp245_2050,over65_benefit_ssp245_2060,\
             under65_benefit_ssp245_2050,under65_benefit_ssp245_2060"
        )
    );
}
