//! Configuration for baseline threshold estimation.

use crate::error::ThresholdError;

/// What to do with a cell whose valid-sample count is below
/// `min_valid_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsufficientPolicy {
    /// Fail the whole estimation with the lowest-index offending cell.
    #[default]
    Fail,
    /// Leave the cell without a threshold and record the error.
    Exclude,
}

/// Configuration for threshold estimation.
///
/// # Example
///
/// ```
/// use heatrisk_threshold::ThresholdConfig;
///
/// let config = ThresholdConfig::new()
///     .with_percentile(95.0)
///     .with_min_valid_days(300)
///     .with_missing_sentinel(Some(-9999.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ThresholdConfig {
    percentile: f64,
    min_valid_days: usize,
    missing_sentinel: Option<f64>,
    on_insufficient: InsufficientPolicy,
}

impl ThresholdConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `percentile = 97.5`, `min_valid_days = 1`,
    /// `missing_sentinel = None`, `on_insufficient = Fail`.
    pub fn new() -> Self {
        Self {
            percentile: 97.5,
            min_valid_days: 1,
            missing_sentinel: None,
            on_insufficient: InsufficientPolicy::Fail,
        }
    }

    // --- Builder methods ---

    /// Sets the threshold percentile (0..=100).
    pub fn with_percentile(mut self, p: f64) -> Self {
        self.percentile = p;
        self
    }

    /// Sets the minimum number of valid pooled samples per cell.
    pub fn with_min_valid_days(mut self, n: usize) -> Self {
        self.min_valid_days = n;
        self
    }

    /// Sets a value that marks a missing reading, in addition to NaN.
    pub fn with_missing_sentinel(mut self, sentinel: Option<f64>) -> Self {
        self.missing_sentinel = sentinel;
        self
    }

    /// Sets the policy for cells with too few valid samples.
    pub fn with_on_insufficient(mut self, policy: InsufficientPolicy) -> Self {
        self.on_insufficient = policy;
        self
    }

    // --- Accessors ---

    /// Returns the threshold percentile.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Returns the minimum number of valid pooled samples per cell.
    pub fn min_valid_days(&self) -> usize {
        self.min_valid_days
    }

    /// Returns the missing-value sentinel, if any.
    pub fn missing_sentinel(&self) -> Option<f64> {
        self.missing_sentinel
    }

    /// Returns the policy for cells with too few valid samples.
    pub fn on_insufficient(&self) -> InsufficientPolicy {
        self.on_insufficient
    }

    /// Whether `v` counts as a valid reading under this configuration.
    ///
    /// NaN and infinities are always invalid.
    pub fn is_valid_reading(&self, v: f64) -> bool {
        v.is_finite() && self.missing_sentinel != Some(v)
    }

    /// Validates this configuration.
    ///
    /// Checks that `percentile` is finite and within 0..=100,
    /// `min_valid_days` is at least 1, and the sentinel (if set) is finite.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if !self.percentile.is_finite() || !(0.0..=100.0).contains(&self.percentile) {
            return Err(ThresholdError::InvalidParameter {
                reason: format!(
                    "percentile must be finite and within 0..=100, got {}",
                    self.percentile
                ),
            });
        }

        if self.min_valid_days < 1 {
            return Err(ThresholdError::InvalidParameter {
                reason: format!("min_valid_days must be >= 1, got {}", self.min_valid_days),
            });
        }

        if let Some(s) = self.missing_sentinel
            && !s.is_finite()
        {
            return Err(ThresholdError::InvalidParameter {
                reason: format!("missing_sentinel must be finite, got {s}"),
            });
        }

        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new()
    }
}
