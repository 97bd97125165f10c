//! Statistical helper functions for the heatrisk pipeline.

/// R's default quantile algorithm (type=7), i.e. linear interpolation
/// between closest ranks.
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Linear-interpolation percentile on the 0..=100 scale.
///
/// `percentile(sorted, 100.0)` is the maximum and `percentile(sorted, 0.0)`
/// the minimum. **Expects pre-sorted input.**
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    quantile_type7(sorted, pct / 100.0)
}

/// Sorts finite values ascending in place.
///
/// Callers filter out NaN before sorting; any stray NaN compares equal so
/// the sort never panics.
pub fn sort_ascending(data: &mut [f64]) {
    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

/// Compensated (Neumaier) summation.
///
/// Keeps a running correction term so long sums of mixed-magnitude values
/// lose far less precision than a naive fold. The result still depends on
/// iteration order; callers needing order independence must iterate in a
/// canonical order.
pub fn neumaier_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut comp = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            comp += (sum - t) + v;
        } else {
            comp += (v - t) + sum;
        }
        sum = t;
    }
    sum + comp
}
