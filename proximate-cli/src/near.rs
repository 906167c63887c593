//! `near` command: places roughly a given distance from an origin.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use proximate_core::{
    DEFAULT_RESULT_CAP, DistanceUnit, EngineConfig, PlaceIndex, ProximityEngine, QueryParams,
    RankedResult, ResolvedOrigin,
};
use proximate_data::GazetteerResolver;
use serde::{Deserialize, Serialize};

use crate::origin::{OriginSpec, load_dataset};
use crate::output::write_json;
use crate::{
    ARG_DATASET, ARG_DISTANCE, ARG_LAT, ARG_LIMIT, ARG_LON, ARG_TOLERANCE, ARG_UNIT, CliError,
    ENV_NEAR_DATASET, ENV_NEAR_DISTANCE, ENV_NEAR_ORIGIN,
};

/// CLI arguments for the `near` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "near",
    long_about = "Search a place dataset for entries whose great-circle \
                 distance from the origin lies within the tolerance of the \
                 requested distance. Results are sorted by how closely they \
                 match and printed as JSON.",
    about = "List places about a given distance from an origin"
)]
#[ortho_config(prefix = "PROXIMATE")]
pub(crate) struct NearArgs {
    /// Place name to search from, resolved against the dataset.
    #[arg(value_name = "origin")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Origin latitude in degrees; use with --lon instead of a name.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Origin longitude in degrees; use with --lat instead of a name.
    #[arg(long = ARG_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Target distance in the chosen unit.
    #[arg(long = ARG_DISTANCE, value_name = "distance")]
    #[serde(default)]
    pub(crate) distance: Option<f64>,
    /// Accepted deviation from the target (default 5, at most 50 miles).
    #[arg(long = ARG_TOLERANCE, value_name = "distance")]
    #[serde(default)]
    pub(crate) tolerance: Option<f64>,
    /// Unit for distance and tolerance: `km` or `mi` (default `mi`).
    #[arg(long = ARG_UNIT, value_name = "km|mi")]
    #[serde(default)]
    pub(crate) unit: Option<DistanceUnit>,
    /// Maximum number of results (default 200).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to a JSON dataset of places.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl NearArgs {
    pub(crate) fn into_config(self) -> Result<NearConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearConfig::try_from(merged)
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearConfig, CliError> {
    let merged = NearArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearConfig::try_from(merged)
}

/// Resolved `near` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearConfig {
    pub(crate) origin: OriginSpec,
    pub(crate) params: QueryParams,
    pub(crate) limit: usize,
    pub(crate) dataset: Utf8PathBuf,
}

impl TryFrom<NearArgs> for NearConfig {
    type Error = CliError;

    fn try_from(args: NearArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_NEAR_DATASET,
        })?;
        let distance = args.distance.ok_or(CliError::MissingArgument {
            field: ARG_DISTANCE,
            env: ENV_NEAR_DISTANCE,
        })?;
        let origin = OriginSpec::from_parts(args.origin, args.lat, args.lon, ENV_NEAR_ORIGIN)?;
        Ok(Self {
            origin,
            params: QueryParams {
                target: Some(distance),
                tolerance: args.tolerance,
                unit: args.unit,
            },
            limit: args.limit.unwrap_or(DEFAULT_RESULT_CAP),
            dataset,
        })
    }
}

/// Effective search parameters after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct SearchSummary {
    pub(crate) distance: f64,
    pub(crate) tolerance: f64,
    pub(crate) unit: DistanceUnit,
}

/// Output of the `near` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct NearReport {
    pub(crate) origin: Option<ResolvedOrigin>,
    pub(crate) search: Option<SearchSummary>,
    pub(crate) results: Vec<RankedResult>,
}

impl NearReport {
    const fn unresolved() -> Self {
        Self {
            origin: None,
            search: None,
            results: Vec::new(),
        }
    }
}

pub(crate) fn run_near(args: NearArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_near(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_near(config: &NearConfig) -> Result<NearReport, CliError> {
    let resolver = GazetteerResolver::new(load_dataset(&config.dataset)?);
    let Some(origin) = config.origin.resolve(&resolver) else {
        return Ok(NearReport::unresolved());
    };

    let engine = ProximityEngine::new(EngineConfig {
        result_cap: config.limit,
        ..EngineConfig::default()
    })
    .map_err(CliError::InvalidQuery)?;
    let query = engine
        .resolve_query(origin.coordinate, config.params)
        .map_err(CliError::InvalidQuery)?;
    let index = PlaceIndex::new(resolver.into_places());
    let results = engine.find_places_near_distance_indexed(&query, &index);

    Ok(NearReport {
        origin: Some(origin),
        search: Some(SearchSummary {
            distance: query.target_distance(),
            tolerance: query.tolerance(),
            unit: query.unit(),
        }),
        results,
    })
}
