//! Per cell-year mortality arithmetic.

use crate::config::RiskModel;
use crate::error::MortalityError;

/// Expected annual deaths: `population * mortality_rate`.
///
/// # Errors
///
/// Returns [`MortalityError::InvalidParameter`] if `population` is negative
/// or non-finite, or `mortality_rate` is not a finite positive number.
pub fn expected_deaths(population: f64, mortality_rate: f64) -> Result<f64, MortalityError> {
    if !population.is_finite() || population < 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!("population must be finite and non-negative, got {population}"),
        });
    }
    if !mortality_rate.is_finite() || mortality_rate <= 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!("mortality rate must be finite and positive, got {mortality_rate}"),
        });
    }
    Ok(population * mortality_rate)
}

/// Checks a relative-risk-per-day coefficient.
pub(crate) fn check_risk_per_day(beta: f64) -> Result<(), MortalityError> {
    if !beta.is_finite() || beta < 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!("risk_per_day must be finite and non-negative, got {beta}"),
        });
    }
    Ok(())
}

/// Excess deaths of one cell-year from `days` heatwave days.
///
/// `expected` is the cell's expected annual deaths and `beta` the relative
/// risk added per heatwave day. Zero days always give zero excess.
///
/// # Errors
///
/// Returns [`MortalityError::InvalidParameter`] for a negative day count,
/// negative or non-finite `expected` or `beta`, or a compounded result that
/// overflows.
///
/// # Example
///
/// ```
/// use heatrisk_mortality::{RiskModel, excess_deaths};
///
/// let e = excess_deaths(2.0, 5, 0.01, RiskModel::Linear).unwrap();
/// assert!((e - 0.1).abs() < 1e-12);
/// ```
pub fn excess_deaths(
    expected: f64,
    days: i64,
    beta: f64,
    model: RiskModel,
) -> Result<f64, MortalityError> {
    if days < 0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!("heatwave day count must be non-negative, got {days}"),
        });
    }
    if !expected.is_finite() || expected < 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!("expected deaths must be finite and non-negative, got {expected}"),
        });
    }
    check_risk_per_day(beta)?;

    if days == 0 {
        return Ok(0.0);
    }

    let d = days as f64;
    let excess = match model {
        RiskModel::Linear => expected * beta * d,
        // exp_m1/ln_1p keep precision for small beta.
        RiskModel::Compounded => expected * (d * beta.ln_1p()).exp_m1(),
    };

    if !excess.is_finite() {
        return Err(MortalityError::InvalidParameter {
            reason: format!(
                "excess deaths overflow for {days} days at risk_per_day {beta} ({model:?})"
            ),
        });
    }
    Ok(excess)
}

/// Deaths attributable to heat from an annual excess-risk fraction:
/// `excess_risk[i] * deaths[i]`.
///
/// # Errors
///
/// Returns [`MortalityError::Alignment`] if the slices differ in length and
/// [`MortalityError::InvalidParameter`] for a negative or non-finite value.
pub fn attributable_deaths(excess_risk: &[f64], deaths: &[f64]) -> Result<Vec<f64>, MortalityError> {
    if excess_risk.len() != deaths.len() {
        return Err(MortalityError::Alignment {
            source: heatrisk_grid::GridError::Alignment {
                what: "death counts".to_string(),
                expected: excess_risk.len(),
                got: deaths.len(),
            },
        });
    }

    excess_risk
        .iter()
        .zip(deaths)
        .enumerate()
        .map(|(i, (&er, &d))| attributable(er, d, || format!("at cell {i}")))
        .collect()
}

/// `excess_risk * deaths` for one cell-year; `location` names the cell in
/// error messages.
pub(crate) fn attributable<F>(excess_risk: f64, deaths: f64, location: F) -> Result<f64, MortalityError>
where
    F: Fn() -> String,
{
    if !excess_risk.is_finite() || excess_risk < 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!(
                "excess risk {} must be finite and non-negative, got {excess_risk}",
                location()
            ),
        });
    }
    if !deaths.is_finite() || deaths < 0.0 {
        return Err(MortalityError::InvalidParameter {
            reason: format!(
                "deaths {} must be finite and non-negative, got {deaths}",
                location()
            ),
        });
    }
    Ok(excess_risk * deaths)
}
