use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Heatwave mortality and early-warning benefit projections.
#[derive(Parser)]
#[command(
    name = "heatrisk",
    version,
    about = "Heatwave mortality and early-warning benefit projections"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Estimate per-cell baseline thresholds from pooled baseline tables.
    Threshold(ThresholdArgs),
    /// Count heatwave days per cell, scenario and year.
    Count(CountArgs),
    /// Estimate excess deaths from heatwave day counts.
    Excess(ExcessArgs),
    /// Estimate deaths averted by an early-warning system.
    Benefit(BenefitArgs),
    /// Run all four stages from one configuration file.
    Run(RunArgs),
}

/// Arguments for the `threshold` subcommand.
#[derive(clap::Args)]
pub struct ThresholdArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Baseline daily temperature CSV (repeatable; overrides [io].baseline).
    #[arg(short, long = "baseline")]
    pub baselines: Vec<PathBuf>,

    /// Output threshold CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override threshold percentile from config.
    #[arg(long)]
    pub percentile: Option<f64>,

    /// Override the minimum number of valid pooled samples per cell.
    #[arg(long)]
    pub min_valid_days: Option<usize>,

    /// Override the insufficient-data policy (`fail` or `exclude`).
    #[arg(long)]
    pub on_insufficient: Option<String>,
}

/// Arguments for the `count` subcommand.
#[derive(clap::Args)]
pub struct CountArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Threshold CSV produced by `threshold`.
    #[arg(short, long)]
    pub thresholds: PathBuf,

    /// Projection as `SCENARIO=PATH` (repeatable, also per scenario for
    /// per-year files; overrides [io].projections).
    #[arg(short, long = "projection")]
    pub projections: Vec<String>,

    /// Output heatwave-days CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the comparator (`strict` or `inclusive`).
    #[arg(long)]
    pub comparator: Option<String>,
}

/// Arguments for the `excess` subcommand.
#[derive(clap::Args)]
pub struct ExcessArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Heatwave-days CSV produced by `count` (required by the `risk`
    /// method).
    #[arg(long)]
    pub heatwave: Option<PathBuf>,

    /// Output excess-deaths CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the population CSV from config.
    #[arg(long)]
    pub population: Option<PathBuf>,

    /// Override the mortality-rate CSV from config.
    #[arg(long)]
    pub mortality_rate: Option<PathBuf>,

    /// Override the relative risk per heatwave day.
    #[arg(long)]
    pub risk_per_day: Option<f64>,

    /// Override the risk model (`linear` or `compounded`).
    #[arg(long)]
    pub risk_model: Option<String>,

    /// Override the method (`risk` or `attributable`).
    #[arg(long)]
    pub method: Option<String>,

    /// Override the excess-risk CSV (`attributable` method).
    #[arg(long)]
    pub excess_risk: Option<PathBuf>,

    /// Override the annual deaths CSV (`attributable` method).
    #[arg(long)]
    pub deaths: Option<PathBuf>,
}

/// Arguments for the `benefit` subcommand.
#[derive(clap::Args)]
pub struct BenefitArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Heatwave-days CSV produced by `count`.
    #[arg(long)]
    pub heatwave: PathBuf,

    /// Output benefit CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the method (`risk` or `rate`).
    #[arg(long)]
    pub method: Option<String>,

    /// Override the risk model (`linear` or `compounded`) of the `risk`
    /// method.
    #[arg(long)]
    pub risk_model: Option<String>,

    /// Override the 65+ population CSV.
    #[arg(long)]
    pub pop_over65: Option<PathBuf>,

    /// Override the under-65 population CSV.
    #[arg(long)]
    pub pop_under65: Option<PathBuf>,

    /// Override the 65+ risk reduction.
    #[arg(long)]
    pub reduction_over65: Option<f64>,

    /// Override the under-65 risk reduction.
    #[arg(long)]
    pub reduction_under65: Option<f64>,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "heatrisk.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
