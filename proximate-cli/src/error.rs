//! Error types emitted by the Proximate CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use proximate_core::GeoError;
use proximate_data::DatasetError;
use thiserror::Error;

/// Errors emitted by the Proximate CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag or positional argument.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one half of an explicit origin coordinate was supplied.
    #[error("--{provided} requires --{missing}")]
    IncompleteCoordinate {
        /// Flag that was supplied.
        provided: &'static str,
        /// Flag that must accompany it.
        missing: &'static str,
    },
    /// An explicit origin coordinate was out of range or non-finite.
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[source] GeoError),
    /// Search parameters failed validation.
    #[error("invalid search parameters: {0}")]
    InvalidQuery(#[source] GeoError),
    /// The place dataset could not be loaded.
    #[error("failed to load dataset {path:?}: {source}")]
    LoadDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying dataset error.
        #[source]
        source: DatasetError,
    },
    /// Serializing the command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
