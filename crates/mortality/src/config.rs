//! Configuration for excess death estimation.

/// Functional form relating heatwave days to excess mortality.
///
/// `E` is the expected annual deaths of a cell, `beta` the relative risk per
/// heatwave day and `d` the heatwave day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskModel {
    /// `E * beta * d`.
    #[default]
    Linear,
    /// `E * ((1 + beta)^d - 1)`.
    Compounded,
}

/// Configuration for excess death estimation.
///
/// # Example
///
/// ```
/// use heatrisk_mortality::{ExcessConfig, RiskModel};
///
/// let config = ExcessConfig::new().with_risk_model(RiskModel::Compounded);
/// assert_eq!(config.risk_model(), RiskModel::Compounded);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExcessConfig {
    risk_model: RiskModel,
}

impl ExcessConfig {
    /// Creates a new configuration with the linear risk model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk model.
    pub fn with_risk_model(mut self, model: RiskModel) -> Self {
        self.risk_model = model;
        self
    }

    /// Returns the risk model.
    pub fn risk_model(&self) -> RiskModel {
        self.risk_model
    }
}
