//! `ecom-eda` command-line entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ecom_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command};
use crate::commands::{run_analyze, run_datasets};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_config()).context("failed to initialize logging")?;
    match cli.command {
        Command::Analyze(args) => print_summary(&run_analyze(&args)?),
        Command::Datasets => run_datasets()?,
    }
    Ok(())
}
