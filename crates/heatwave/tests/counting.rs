//! Integration tests for heatwave day counting.

use chrono::NaiveDate;
use heatrisk_grid::{DailyField, Grid, GroupKey};
use heatrisk_heatwave::{
    Comparator, CounterConfig, Coverage, HeatwaveError, Projection, count_heatwave_days,
};
use heatrisk_threshold::ThresholdGrid;

/// Daily dates from `start` for `n` days.
fn dates_from(y: i32, m: u32, d: u32, n: usize) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .iter_days()
        .take(n)
        .collect()
}

fn thresholds(values: Vec<Option<f64>>) -> ThresholdGrid {
    let grid = Grid::sequential(values.len()).unwrap();
    ThresholdGrid::from_values(grid, values).unwrap()
}

// ---------------------------------------------------------------------------
// 1. Basic counting per year
// ---------------------------------------------------------------------------

#[test]
fn five_hot_days_in_2050() {
    let thr = thresholds(vec![Some(30.0)]);
    let mut temps = vec![25.0; 10];
    for t in temps.iter_mut().take(5) {
        *t = 31.0;
    }
    let field = DailyField::new(thr.grid().clone(), dates_from(2050, 7, 1, 10), temps).unwrap();

    let hw = count_heatwave_days(
        &thr,
        &[Projection::new("ssp245", field)],
        &CounterConfig::new(),
    )
    .unwrap();

    let key = GroupKey::new("ssp245", 2050);
    assert_eq!(hw.days(&key, 0), Some(5));
    assert_eq!(hw.get(&key, 0).unwrap().coverage(), Coverage::Complete);
    assert_eq!(hw.comparator(), Some(Comparator::Strict));
}

#[test]
fn years_are_counted_separately() {
    let thr = thresholds(vec![Some(30.0)]);
    // Dec 30, Dec 31 of 2049 hot; Jan 1..3 of 2050 with one hot day.
    let field = DailyField::new(
        thr.grid().clone(),
        dates_from(2049, 12, 30, 5),
        vec![35.0, 36.0, 20.0, 40.0, 20.0],
    )
    .unwrap();

    let hw = count_heatwave_days(&thr, &[Projection::new("ssp585", field)], &CounterConfig::new())
        .unwrap();

    assert_eq!(hw.days(&GroupKey::new("ssp585", 2049), 0), Some(2));
    assert_eq!(hw.days(&GroupKey::new("ssp585", 2050), 0), Some(1));
    assert_eq!(hw.keys().count(), 2);
}

#[test]
fn each_cell_uses_its_own_threshold() {
    let thr = thresholds(vec![Some(30.0), Some(20.0)]);
    let field = DailyField::from_cells(
        thr.grid().clone(),
        dates_from(2060, 8, 1, 3),
        vec![vec![25.0, 31.0, 29.0], vec![25.0, 31.0, 29.0]],
    )
    .unwrap();

    let hw =
        count_heatwave_days(&thr, &[Projection::new("s", field)], &CounterConfig::new()).unwrap();
    let key = GroupKey::new("s", 2060);
    assert_eq!(hw.days(&key, 0), Some(1));
    assert_eq!(hw.days(&key, 1), Some(3));
}

// ---------------------------------------------------------------------------
// 2. Comparator and monotonicity
// ---------------------------------------------------------------------------

#[test]
fn comparator_decides_days_on_the_threshold() {
    let thr = thresholds(vec![Some(30.0)]);
    let field = DailyField::new(
        thr.grid().clone(),
        dates_from(2050, 7, 1, 4),
        vec![30.0, 30.0, 30.5, 29.0],
    )
    .unwrap();
    let proj = [Projection::new("s", field)];
    let key = GroupKey::new("s", 2050);

    let strict = count_heatwave_days(&thr, &proj, &CounterConfig::new()).unwrap();
    let inclusive = count_heatwave_days(
        &thr,
        &proj,
        &CounterConfig::new().with_comparator(Comparator::Inclusive),
    )
    .unwrap();

    assert_eq!(strict.days(&key, 0), Some(1));
    assert_eq!(inclusive.days(&key, 0), Some(3));
}

#[test]
fn count_never_decreases_as_threshold_drops() {
    let temps: Vec<f64> = (0..365).map(|i| 15.0 + ((i * 7919) % 200) as f64 * 0.1).collect();
    let grid = Grid::sequential(1).unwrap();
    let field = DailyField::new(grid.clone(), dates_from(2070, 1, 1, 365), temps).unwrap();
    let proj = [Projection::new("s", field)];
    let key = GroupKey::new("s", 2070);

    for comparator in [Comparator::Strict, Comparator::Inclusive] {
        let cfg = CounterConfig::new().with_comparator(comparator);
        let mut previous = 0;
        for step in 0..=30 {
            let thr_value = 36.0 - step as f64 * 0.75;
            let thr = ThresholdGrid::from_values(grid.clone(), vec![Some(thr_value)]).unwrap();
            let days = count_heatwave_days(&thr, &proj, &cfg)
                .unwrap()
                .days(&key, 0)
                .unwrap();
            assert!(
                days >= previous,
                "count fell from {previous} to {days} at threshold {thr_value}"
            );
            previous = days;
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenarios_are_kept_apart() {
    let thr = thresholds(vec![Some(30.0)]);
    let low = DailyField::new(thr.grid().clone(), dates_from(2050, 7, 1, 3), vec![31.0, 20.0, 20.0])
        .unwrap();
    let high = DailyField::new(thr.grid().clone(), dates_from(2050, 7, 1, 3), vec![31.0; 3])
        .unwrap();

    let hw = count_heatwave_days(
        &thr,
        &[Projection::new("ssp126", low), Projection::new("ssp585", high)],
        &CounterConfig::new(),
    )
    .unwrap();

    assert_eq!(hw.days(&GroupKey::new("ssp126", 2050), 0), Some(1));
    assert_eq!(hw.days(&GroupKey::new("ssp585", 2050), 0), Some(3));
    assert_eq!(hw.counts().scenarios(), vec!["ssp126", "ssp585"]);
}

#[test]
fn scenario_split_across_year_files() {
    let thr = thresholds(vec![Some(30.0)]);
    let y2050 = DailyField::new(thr.grid().clone(), dates_from(2050, 7, 1, 3), vec![31.0; 3])
        .unwrap();
    let y2051 = DailyField::new(
        thr.grid().clone(),
        dates_from(2051, 7, 1, 3),
        vec![31.0, 29.0, 29.0],
    )
    .unwrap();

    let hw = count_heatwave_days(
        &thr,
        &[
            Projection::new("ssp245", y2050),
            Projection::new("ssp245", y2051),
        ],
        &CounterConfig::new(),
    )
    .unwrap();

    assert_eq!(hw.days(&GroupKey::new("ssp245", 2050), 0), Some(3));
    assert_eq!(hw.days(&GroupKey::new("ssp245", 2051), 0), Some(1));
    assert_eq!(hw.counts().scenarios(), vec!["ssp245"]);
}

#[test]
fn repeated_scenario_year_is_rejected() {
    let thr = thresholds(vec![Some(30.0)]);
    let f = DailyField::new(thr.grid().clone(), dates_from(2050, 7, 1, 1), vec![31.0]).unwrap();
    let err = count_heatwave_days(
        &thr,
        &[Projection::new("a", f.clone()), Projection::new("a", f)],
        &CounterConfig::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HeatwaveError::DuplicateGroup { ref scenario, year: 2050 } if scenario == "a"
    ));
}

#[test]
fn empty_projection_list_is_rejected() {
    let thr = thresholds(vec![Some(30.0)]);
    let err = count_heatwave_days(&thr, &[], &CounterConfig::new()).unwrap_err();
    assert!(matches!(err, HeatwaveError::EmptyInput));
}

// ---------------------------------------------------------------------------
// 4. Missing data and excluded cells
// ---------------------------------------------------------------------------

#[test]
fn cell_year_without_valid_days_is_flagged_not_failed() {
    let thr = thresholds(vec![Some(30.0), Some(30.0)]);
    let field = DailyField::from_cells(
        thr.grid().clone(),
        dates_from(2050, 7, 1, 3),
        vec![vec![f64::NAN; 3], vec![31.0, f64::NAN, 32.0]],
    )
    .unwrap();

    let hw =
        count_heatwave_days(&thr, &[Projection::new("s", field)], &CounterConfig::new()).unwrap();
    let key = GroupKey::new("s", 2050);

    let empty = hw.get(&key, 0).unwrap();
    assert_eq!(empty.days(), 0);
    assert_eq!(empty.coverage(), Coverage::NoValidDays);

    let partial = hw.get(&key, 1).unwrap();
    assert_eq!(partial.days(), 2);
    assert_eq!(partial.valid_days(), 2);
    assert_eq!(partial.coverage(), Coverage::Partial);

    assert_eq!(hw.low_confidence(), vec![(key, 0)]);
}

#[test]
fn cells_without_threshold_have_no_count() {
    let thr = thresholds(vec![None, Some(30.0)]);
    let field = DailyField::from_cells(
        thr.grid().clone(),
        dates_from(2050, 7, 1, 2),
        vec![vec![40.0, 40.0], vec![40.0, 40.0]],
    )
    .unwrap();
    let hw =
        count_heatwave_days(&thr, &[Projection::new("s", field)], &CounterConfig::new()).unwrap();
    let key = GroupKey::new("s", 2050);
    assert_eq!(hw.days(&key, 0), None);
    assert_eq!(hw.days(&key, 1), Some(2));
}

// ---------------------------------------------------------------------------
// 5. Alignment
// ---------------------------------------------------------------------------

#[test]
fn misaligned_projection_is_rejected() {
    let thr = thresholds(vec![Some(30.0), Some(30.0)]);
    let field = DailyField::new(
        Grid::sequential(3).unwrap(),
        dates_from(2050, 7, 1, 1),
        vec![31.0; 3],
    )
    .unwrap();
    let err = count_heatwave_days(&thr, &[Projection::new("ssp245", field)], &CounterConfig::new())
        .unwrap_err();
    match err {
        HeatwaveError::Alignment { scenario, .. } => assert_eq!(scenario, "ssp245"),
        other => panic!("unexpected error {other:?}"),
    }
}
