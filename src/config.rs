use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level heatrisk configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HeatriskConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Baseline threshold settings.
    #[serde(default)]
    pub threshold: ThresholdToml,

    /// Heatwave day counting settings.
    #[serde(default)]
    pub heatwave: HeatwaveToml,

    /// Excess mortality settings.
    #[serde(default)]
    pub mortality: MortalityToml,

    /// Early-warning benefit settings.
    #[serde(default)]
    pub warning: WarningToml,
}

impl HeatriskConfig {
    /// Reads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Baseline daily temperature tables, pooled per cell.
    #[serde(default)]
    pub baseline: Vec<PathBuf>,
    /// Projection daily temperature tables keyed by scenario label. A
    /// scenario takes one path or a list (for example one file per year).
    #[serde(default)]
    pub projections: BTreeMap<String, ProjectionPaths>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_threshold_column")]
    pub threshold_column: String,
    #[serde(default)]
    pub missing_sentinel: Option<f64>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            baseline: Vec::new(),
            projections: BTreeMap::new(),
            output_dir: default_output_dir(),
            threshold_column: default_threshold_column(),
            missing_sentinel: None,
        }
    }
}

/// One or several daily tables of a single scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProjectionPaths {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl ProjectionPaths {
    /// The tables in the order given.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            ProjectionPaths::One(p) => std::slice::from_ref(p),
            ProjectionPaths::Many(ps) => ps,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_threshold_column() -> String {
    heatrisk_io::THRESHOLD_COLUMN.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdToml {
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    #[serde(default = "default_min_valid_days")]
    pub min_valid_days: usize,
    #[serde(default = "default_on_insufficient")]
    pub on_insufficient: String,
}

impl Default for ThresholdToml {
    fn default() -> Self {
        Self {
            percentile: default_percentile(),
            min_valid_days: default_min_valid_days(),
            on_insufficient: default_on_insufficient(),
        }
    }
}

fn default_percentile() -> f64 {
    97.5
}
fn default_min_valid_days() -> usize {
    1
}
fn default_on_insufficient() -> String {
    "fail".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatwaveToml {
    #[serde(default = "default_comparator")]
    pub comparator: String,
}

impl Default for HeatwaveToml {
    fn default() -> Self {
        Self {
            comparator: default_comparator(),
        }
    }
}

fn default_comparator() -> String {
    "strict".to_string()
}

/// Where to find one population's exposure, and its per-day risk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExposureToml {
    /// Table with one `<population_prefix><year>` column per year.
    #[serde(default)]
    pub population: Option<PathBuf>,
    /// Column prefix; each population has its own default.
    #[serde(default)]
    pub population_prefix: Option<String>,
    /// Table with the annual baseline mortality rate per cell.
    #[serde(default)]
    pub mortality_rate: Option<PathBuf>,
    #[serde(default = "default_rate_column")]
    pub rate_column: String,
    /// Relative risk added per heatwave day.
    #[serde(default)]
    pub risk_per_day: Option<f64>,
}

impl Default for ExposureToml {
    fn default() -> Self {
        Self {
            population: None,
            population_prefix: None,
            mortality_rate: None,
            rate_column: default_rate_column(),
            risk_per_day: None,
        }
    }
}

fn default_rate_column() -> String {
    "MortalityRate".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MortalityToml {
    /// `risk` (heatwave days and per-day risk) or `attributable` (supplied
    /// excess-risk fractions times deaths).
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_risk_model")]
    pub risk_model: String,
    #[serde(default)]
    pub exposure: ExposureToml,
    #[serde(default)]
    pub attributable: AttributableToml,
}

impl Default for MortalityToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            risk_model: default_risk_model(),
            exposure: ExposureToml::default(),
            attributable: AttributableToml::default(),
        }
    }
}

/// Inputs of the `attributable` excess-death method.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributableToml {
    /// Table with one `<excess_risk_prefix><year>` column per year.
    #[serde(default)]
    pub excess_risk: Option<PathBuf>,
    #[serde(default = "default_excess_risk_prefix")]
    pub excess_risk_prefix: String,
    /// Table with one `<deaths_prefix><year>` column per year.
    #[serde(default)]
    pub deaths: Option<PathBuf>,
    #[serde(default = "default_deaths_prefix")]
    pub deaths_prefix: String,
    /// Scenario label the results are grouped under.
    #[serde(default = "default_attributable_scenario")]
    pub scenario: String,
}

impl Default for AttributableToml {
    fn default() -> Self {
        Self {
            excess_risk: None,
            excess_risk_prefix: default_excess_risk_prefix(),
            deaths: None,
            deaths_prefix: default_deaths_prefix(),
            scenario: default_attributable_scenario(),
        }
    }
}

fn default_excess_risk_prefix() -> String {
    "ER_".to_string()
}
fn default_deaths_prefix() -> String {
    "Deaths-".to_string()
}
fn default_attributable_scenario() -> String {
    "observed".to_string()
}

fn default_risk_model() -> String {
    "linear".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningToml {
    /// `risk` (reduced per-day risk) or `rate` (deaths per million
    /// person-days).
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub risk_reduction_over65: f64,
    #[serde(default)]
    pub risk_reduction_under65: f64,
    #[serde(default = "default_rate_over65")]
    pub rate_over65_per_million: f64,
    #[serde(default = "default_rate_under65")]
    pub rate_under65_per_million: f64,
    #[serde(default)]
    pub over65: ExposureToml,
    #[serde(default)]
    pub under65: ExposureToml,
}

impl Default for WarningToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            risk_reduction_over65: 0.0,
            risk_reduction_under65: 0.0,
            rate_over65_per_million: default_rate_over65(),
            rate_under65_per_million: default_rate_under65(),
            over65: ExposureToml::default(),
            under65: ExposureToml::default(),
        }
    }
}

fn default_method() -> String {
    "risk".to_string()
}
fn default_rate_over65() -> f64 {
    5.0
}
fn default_rate_under65() -> f64 {
    0.0127
}
