//! `between` command: distance and travel estimates between two places.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use proximate_core::{DistanceSummary, ProximityEngine, ResolvedOrigin};
use proximate_data::GazetteerResolver;
use serde::{Deserialize, Serialize};

use crate::origin::{load_dataset, required_name, resolve_named};
use crate::output::write_json;
use crate::{
    ARG_DATASET, ARG_FROM, ARG_TO, CliError, ENV_BETWEEN_DATASET, ENV_BETWEEN_FROM,
    ENV_BETWEEN_TO,
};

/// CLI arguments for the `between` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "between",
    about = "Measure the distance between two places"
)]
#[ortho_config(prefix = "PROXIMATE")]
pub(crate) struct BetweenArgs {
    /// Starting place name.
    #[arg(value_name = "from")]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Destination place name.
    #[arg(value_name = "to")]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Path to a JSON dataset of places.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl BetweenArgs {
    pub(crate) fn into_config(self) -> Result<BetweenConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BetweenConfig::try_from(merged)
    }
}

/// Resolved `between` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BetweenConfig {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) dataset: Utf8PathBuf,
}

impl TryFrom<BetweenArgs> for BetweenConfig {
    type Error = CliError;

    fn try_from(args: BetweenArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_BETWEEN_DATASET,
        })?;
        Ok(Self {
            from: required_name(args.from, ARG_FROM, ENV_BETWEEN_FROM)?,
            to: required_name(args.to, ARG_TO, ENV_BETWEEN_TO)?,
            dataset,
        })
    }
}

/// Output of the `between` command. `summary` is absent when either end
/// could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BetweenReport {
    pub(crate) from: Option<ResolvedOrigin>,
    pub(crate) to: Option<ResolvedOrigin>,
    pub(crate) summary: Option<DistanceSummary>,
}

pub(crate) fn run_between(args: BetweenArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_between(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_between(config: &BetweenConfig) -> Result<BetweenReport, CliError> {
    let resolver = GazetteerResolver::new(load_dataset(&config.dataset)?);
    let from = resolve_named(&resolver, &config.from);
    let to = resolve_named(&resolver, &config.to);
    let summary = match (&from, &to) {
        (Some(start), Some(end)) => {
            Some(ProximityEngine::default().measure(start.coordinate, end.coordinate))
        }
        _ => None,
    };
    Ok(BetweenReport { from, to, summary })
}
