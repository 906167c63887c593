//! Entry point for the `proximate` command-line interface.
#![forbid(unsafe_code)]

use env_logger::Env;
use eyre::WrapErr;
use proximate_cli::CliError;

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    match proximate_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        other => other.wrap_err("proximate failed"),
    }
}
