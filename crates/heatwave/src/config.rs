//! Configuration for heatwave day counting.

use crate::error::HeatwaveError;

/// Exceedance test applied to each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparator {
    /// `temperature > threshold`.
    #[default]
    Strict,
    /// `temperature >= threshold`.
    Inclusive,
}

impl Comparator {
    /// Whether `temperature` counts as an exceedance of `threshold`.
    #[inline]
    pub fn exceeds(self, temperature: f64, threshold: f64) -> bool {
        match self {
            Comparator::Strict => temperature > threshold,
            Comparator::Inclusive => temperature >= threshold,
        }
    }
}

/// Configuration for heatwave day counting.
///
/// # Example
///
/// ```
/// use heatrisk_heatwave::{Comparator, CounterConfig};
///
/// let config = CounterConfig::new().with_comparator(Comparator::Inclusive);
/// assert_eq!(config.comparator(), Comparator::Inclusive);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CounterConfig {
    comparator: Comparator,
    missing_sentinel: Option<f64>,
}

impl CounterConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `comparator = Strict`, `missing_sentinel = None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exceedance comparator.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Sets a value that marks a missing reading, in addition to NaN.
    pub fn with_missing_sentinel(mut self, sentinel: Option<f64>) -> Self {
        self.missing_sentinel = sentinel;
        self
    }

    /// Returns the exceedance comparator.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Returns the missing-value sentinel, if any.
    pub fn missing_sentinel(&self) -> Option<f64> {
        self.missing_sentinel
    }

    /// Whether `v` counts as a valid daily reading.
    pub fn is_valid_reading(&self, v: f64) -> bool {
        v.is_finite() && self.missing_sentinel != Some(v)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), HeatwaveError> {
        if let Some(s) = self.missing_sentinel
            && !s.is_finite()
        {
            return Err(HeatwaveError::InvalidParameter {
                reason: format!("missing_sentinel must be finite, got {s}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CounterConfig::new();
        assert_eq!(cfg.comparator(), Comparator::Strict);
        assert_eq!(cfg.missing_sentinel(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn strict_excludes_equal() {
        assert!(!Comparator::Strict.exceeds(30.0, 30.0));
        assert!(Comparator::Strict.exceeds(30.1, 30.0));
    }

    #[test]
    fn inclusive_includes_equal() {
        assert!(Comparator::Inclusive.exceeds(30.0, 30.0));
        assert!(!Comparator::Inclusive.exceeds(29.9, 30.0));
    }

    #[test]
    fn nan_never_exceeds() {
        assert!(!Comparator::Strict.exceeds(f64::NAN, 30.0));
        assert!(!Comparator::Inclusive.exceeds(f64::NAN, 30.0));
    }

    #[test]
    fn validate_rejects_infinite_sentinel() {
        let cfg = CounterConfig::new().with_missing_sentinel(Some(f64::INFINITY));
        assert!(cfg.validate().is_err());
    }
}
