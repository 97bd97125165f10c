//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use heatrisk_heatwave::{Comparator, CounterConfig};
use heatrisk_io::ReaderConfig;
use heatrisk_mortality::{ExcessConfig, RiskModel};
use heatrisk_threshold::{InsufficientPolicy, ThresholdConfig};
use heatrisk_warning::{BenefitRates, WarningConfig};

/// Default population column prefix of the all-ages exposure table.
pub const POPULATION_PREFIX: &str = "Pop-";
/// Default population column prefix of the 65+ table.
pub const POPULATION_PREFIX_OVER65: &str = "Pop65-";
/// Default population column prefix of the under-65 table.
pub const POPULATION_PREFIX_UNDER65: &str = "PopU65-";

/// How early-warning benefits are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitMethod {
    /// Excess deaths with and without a reduced per-day risk.
    Risk,
    /// Fixed deaths averted per million person-days.
    Rate,
}

/// Parses a comparator name string into the corresponding enum variant.
pub fn parse_comparator(s: &str) -> Result<Comparator> {
    match s.to_lowercase().as_str() {
        "strict" | ">" => Ok(Comparator::Strict),
        "inclusive" | ">=" => Ok(Comparator::Inclusive),
        other => bail!("unknown comparator: {other:?}"),
    }
}

/// Parses a risk model name string into the corresponding enum variant.
pub fn parse_risk_model(s: &str) -> Result<RiskModel> {
    match s.to_lowercase().as_str() {
        "linear" => Ok(RiskModel::Linear),
        "compounded" => Ok(RiskModel::Compounded),
        other => bail!("unknown risk model: {other:?}"),
    }
}

/// Parses an insufficient-data policy name string.
pub fn parse_insufficient_policy(s: &str) -> Result<InsufficientPolicy> {
    match s.to_lowercase().as_str() {
        "fail" => Ok(InsufficientPolicy::Fail),
        "exclude" => Ok(InsufficientPolicy::Exclude),
        other => bail!("unknown on_insufficient policy: {other:?}"),
    }
}

/// Parses a benefit method name string.
/// How excess deaths are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcessMethod {
    Risk,
    Attributable,
}

pub fn parse_excess_method(s: &str) -> Result<ExcessMethod> {
    match s.to_lowercase().as_str() {
        "risk" => Ok(ExcessMethod::Risk),
        "attributable" => Ok(ExcessMethod::Attributable),
        other => bail!("unknown excess method: {other:?}"),
    }
}

pub fn parse_benefit_method(s: &str) -> Result<BenefitMethod> {
    match s.to_lowercase().as_str() {
        "risk" => Ok(BenefitMethod::Risk),
        "rate" => Ok(BenefitMethod::Rate),
        other => bail!("unknown benefit method: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> ReaderConfig {
    ReaderConfig::default()
        .with_missing_sentinel(io.missing_sentinel)
        .with_threshold_column(&io.threshold_column)
}

/// Builds a [`ThresholdConfig`] from the TOML threshold configuration.
pub fn build_threshold_config(t: &ThresholdToml, io: &IoToml) -> Result<ThresholdConfig> {
    let cfg = ThresholdConfig::new()
        .with_percentile(t.percentile)
        .with_min_valid_days(t.min_valid_days)
        .with_missing_sentinel(io.missing_sentinel)
        .with_on_insufficient(parse_insufficient_policy(&t.on_insufficient)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`CounterConfig`] from the TOML heatwave configuration.
pub fn build_counter_config(h: &HeatwaveToml, io: &IoToml) -> Result<CounterConfig> {
    let cfg = CounterConfig::new()
        .with_comparator(parse_comparator(&h.comparator)?)
        .with_missing_sentinel(io.missing_sentinel);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`ExcessConfig`] from the TOML mortality configuration.
pub fn build_excess_config(m: &MortalityToml) -> Result<ExcessConfig> {
    Ok(ExcessConfig::new().with_risk_model(parse_risk_model(&m.risk_model)?))
}

/// Builds a [`WarningConfig`]; the risk model is shared with the mortality
/// section.
pub fn build_warning_config(w: &WarningToml, m: &MortalityToml) -> Result<WarningConfig> {
    let cfg = WarningConfig::new()
        .with_risk_model(parse_risk_model(&m.risk_model)?)
        .with_risk_reduction_over65(w.risk_reduction_over65)
        .with_risk_reduction_under65(w.risk_reduction_under65);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds [`BenefitRates`] from the TOML warning configuration.
pub fn build_benefit_rates(w: &WarningToml) -> Result<BenefitRates> {
    let rates = BenefitRates::new()
        .with_over65_per_million(w.rate_over65_per_million)
        .with_under65_per_million(w.rate_under65_per_million);
    rates.validate()?;
    Ok(rates)
}
