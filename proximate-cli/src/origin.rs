//! Origin selection and dataset loading shared by every command.

use camino::Utf8Path;
use log::warn;
use proximate_core::{Coordinate, OriginResolver, Place, PlaceSource, ResolvedOrigin};
use proximate_data::{GazetteerResolver, JsonPlaceSource};

use crate::{ARG_LAT, ARG_LON, ARG_ORIGIN, CliError};

/// Where a search starts: a name to look up, or explicit coordinates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OriginSpec {
    Named(String),
    At(Coordinate),
}

impl OriginSpec {
    /// Prefer `--lat`/`--lon` when both are given, otherwise the name.
    pub(crate) fn from_parts(
        name: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
        env: &'static str,
    ) -> Result<Self, CliError> {
        match (lat, lon) {
            (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude)
                .map(Self::At)
                .map_err(CliError::InvalidOrigin),
            (Some(_), None) => Err(CliError::IncompleteCoordinate {
                provided: ARG_LAT,
                missing: ARG_LON,
            }),
            (None, Some(_)) => Err(CliError::IncompleteCoordinate {
                provided: ARG_LON,
                missing: ARG_LAT,
            }),
            (None, None) => required_name(name, ARG_ORIGIN, env).map(Self::Named),
        }
    }

    /// Resolve against the gazetteer, logging a warning when a name is
    /// unknown.
    pub(crate) fn resolve(&self, resolver: &GazetteerResolver) -> Option<ResolvedOrigin> {
        match self {
            Self::Named(name) => resolve_named(resolver, name),
            Self::At(coordinate) => Some(ResolvedOrigin {
                display_name: format!(
                    "{:.4}, {:.4}",
                    coordinate.latitude(),
                    coordinate.longitude()
                ),
                coordinate: *coordinate,
            }),
        }
    }
}

/// Require a non-blank free-text argument.
pub(crate) fn required_name(
    name: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    name.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or(CliError::MissingArgument { field, env })
}

pub(crate) fn resolve_named(resolver: &GazetteerResolver, name: &str) -> Option<ResolvedOrigin> {
    let resolved = resolver.resolve(name);
    if resolved.is_none() {
        warn!("could not resolve origin {name:?}; returning no results");
    }
    resolved
}

pub(crate) fn load_dataset(path: &Utf8Path) -> Result<Vec<Place>, CliError> {
    JsonPlaceSource::new(path)
        .load_places()
        .map_err(|source| CliError::LoadDataset {
            path: path.to_path_buf(),
            source,
        })
}
