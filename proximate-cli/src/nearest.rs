//! `nearest` command: the closest places to an origin.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::warn;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use proximate_core::{DEFAULT_NEAREST_LIMIT, ProximityEngine, RankedResult, ResolvedOrigin};
use proximate_data::GazetteerResolver;
use serde::{Deserialize, Serialize};

use crate::origin::{load_dataset, required_name};
use crate::output::write_json;
use crate::{
    ARG_DATASET, ARG_LIMIT, ARG_ORIGIN, CliError, ENV_NEAREST_DATASET, ENV_NEAREST_ORIGIN,
};

/// CLI arguments for the `nearest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "nearest",
    long_about = "List the places closest to the origin, nearest first. \
                 The origin itself is left out of the list.",
    about = "List the places closest to an origin"
)]
#[ortho_config(prefix = "PROXIMATE")]
pub(crate) struct NearestArgs {
    /// Place name to search from, resolved against the dataset.
    #[arg(value_name = "origin")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Maximum number of results (default 6).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to a JSON dataset of places.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl NearestArgs {
    pub(crate) fn into_config(self) -> Result<NearestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearestConfig::try_from(merged)
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearestConfig, CliError> {
    let merged = NearestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearestConfig::try_from(merged)
}

/// Resolved `nearest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NearestConfig {
    pub(crate) origin: String,
    pub(crate) limit: usize,
    pub(crate) dataset: Utf8PathBuf,
}

impl TryFrom<NearestArgs> for NearestConfig {
    type Error = CliError;

    fn try_from(args: NearestArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_NEAREST_DATASET,
        })?;
        Ok(Self {
            origin: required_name(args.origin, ARG_ORIGIN, ENV_NEAREST_ORIGIN)?,
            limit: args.limit.unwrap_or(DEFAULT_NEAREST_LIMIT),
            dataset,
        })
    }
}

/// Output of the `nearest` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct NearestReport {
    pub(crate) origin: Option<ResolvedOrigin>,
    pub(crate) results: Vec<RankedResult>,
}

pub(crate) fn run_nearest(args: NearestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_nearest(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_nearest(config: &NearestConfig) -> Result<NearestReport, CliError> {
    let resolver = GazetteerResolver::new(load_dataset(&config.dataset)?);
    let Some(place) = resolver.find(&config.origin) else {
        warn!(
            "could not resolve origin {:?}; returning no results",
            config.origin
        );
        return Ok(NearestReport {
            origin: None,
            results: Vec::new(),
        });
    };

    let exclude = place.slug();
    let results = ProximityEngine::default().nearest_places_with_limit(
        place.coordinate,
        resolver.places(),
        Some(&exclude),
        config.limit,
    );
    Ok(NearestReport {
        origin: Some(ResolvedOrigin {
            display_name: place.label(),
            coordinate: place.coordinate,
        }),
        results,
    })
}
