//! Configuration for early-warning benefit estimation.

use heatrisk_mortality::RiskModel;

use crate::band::AgeBand;
use crate::error::WarningError;

/// Configuration for early-warning benefit estimation.
///
/// A risk reduction `r` scales the per-heatwave-day relative risk of its
/// band to `beta * (1 - r)` when a warning system is in place.
///
/// # Example
///
/// ```
/// use heatrisk_warning::{AgeBand, WarningConfig};
///
/// let config = WarningConfig::new()
///     .with_risk_reduction_over65(0.5)
///     .with_risk_reduction_under65(0.2);
/// assert_eq!(config.risk_reduction(AgeBand::Over65), 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct WarningConfig {
    risk_model: RiskModel,
    risk_reduction_over65: f64,
    risk_reduction_under65: f64,
}

impl WarningConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: linear risk model, no risk reduction in either band.
    pub fn new() -> Self {
        Self {
            risk_model: RiskModel::Linear,
            risk_reduction_over65: 0.0,
            risk_reduction_under65: 0.0,
        }
    }

    /// Sets the risk model.
    pub fn with_risk_model(mut self, model: RiskModel) -> Self {
        self.risk_model = model;
        self
    }

    /// Sets the fractional risk reduction for the 65+ band.
    pub fn with_risk_reduction_over65(mut self, r: f64) -> Self {
        self.risk_reduction_over65 = r;
        self
    }

    /// Sets the fractional risk reduction for the under-65 band.
    pub fn with_risk_reduction_under65(mut self, r: f64) -> Self {
        self.risk_reduction_under65 = r;
        self
    }

    /// Returns the risk model.
    pub fn risk_model(&self) -> RiskModel {
        self.risk_model
    }

    /// Returns the risk reduction of `band`.
    pub fn risk_reduction(&self, band: AgeBand) -> f64 {
        match band {
            AgeBand::Over65 => self.risk_reduction_over65,
            AgeBand::Under65 => self.risk_reduction_under65,
        }
    }

    /// Validates this configuration.
    ///
    /// Both risk reductions must lie within `0..=1`.
    pub fn validate(&self) -> Result<(), WarningError> {
        for band in AgeBand::ALL {
            let r = self.risk_reduction(band);
            if !(0.0..=1.0).contains(&r) {
                return Err(WarningError::InvalidParameter {
                    reason: format!("risk_reduction_{} must be within 0..=1, got {r}", band.label()),
                });
            }
        }
        Ok(())
    }
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self::new()
    }
}
