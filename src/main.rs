mod benefit_cmd;
mod cli;
mod config;
mod convert;
mod count_cmd;
mod excess_cmd;
mod inputs;
mod logging;
mod run_cmd;
mod threshold_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Threshold(args) => threshold_cmd::run(args),
        Command::Count(args) => count_cmd::run(args),
        Command::Excess(args) => excess_cmd::run(args),
        Command::Benefit(args) => benefit_cmd::run(args),
        Command::Run(args) => run_cmd::run(args),
    }
}
