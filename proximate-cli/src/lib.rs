//! Command-line interface for Proximate distance searches.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod between;
mod error;
mod near;
mod nearest;
mod origin;
mod output;

pub use error::CliError;

use between::{BetweenArgs, run_between};
use near::{NearArgs, run_near};
use nearest::{NearestArgs, run_nearest};

const ARG_ORIGIN: &str = "origin";
const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ARG_LAT: &str = "lat";
const ARG_LON: &str = "lon";
const ARG_DISTANCE: &str = "distance";
const ARG_TOLERANCE: &str = "tolerance";
const ARG_UNIT: &str = "unit";
const ARG_LIMIT: &str = "limit";
const ARG_DATASET: &str = "dataset";
const ENV_NEAR_ORIGIN: &str = "PROXIMATE_CMDS_NEAR_ORIGIN";
const ENV_NEAR_DISTANCE: &str = "PROXIMATE_CMDS_NEAR_DISTANCE";
const ENV_NEAR_DATASET: &str = "PROXIMATE_CMDS_NEAR_DATASET";
const ENV_BETWEEN_FROM: &str = "PROXIMATE_CMDS_BETWEEN_FROM";
const ENV_BETWEEN_TO: &str = "PROXIMATE_CMDS_BETWEEN_TO";
const ENV_BETWEEN_DATASET: &str = "PROXIMATE_CMDS_BETWEEN_DATASET";
const ENV_NEAREST_ORIGIN: &str = "PROXIMATE_CMDS_NEAREST_ORIGIN";
const ENV_NEAREST_DATASET: &str = "PROXIMATE_CMDS_NEAREST_DATASET";

/// Run the Proximate CLI with the current process arguments and environment.
///
/// Results are written to standard output as pretty-printed JSON.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// dataset cannot be loaded, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Near(args) => run_near(args, writer),
        Command::Between(args) => run_between(args, writer),
        Command::Nearest(args) => run_nearest(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "proximate",
    about = "Find places roughly a given distance from an origin",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List places about a given distance from an origin.
    Near(NearArgs),
    /// Measure the distance between two places.
    Between(BetweenArgs),
    /// List the places closest to an origin.
    Nearest(NearestArgs),
}

#[cfg(test)]
mod tests;
