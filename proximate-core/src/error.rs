//! Error taxonomy shared by the geodesy helpers and the search engine.

use thiserror::Error;

/// Errors raised when inputs to the geodesy helpers or the proximity engine
/// are malformed.
///
/// An empty candidate dataset is not an error; it produces an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude was non-finite or outside its valid range.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// Latitude supplied by the caller, in degrees.
        latitude: f64,
        /// Longitude supplied by the caller, in degrees.
        longitude: f64,
    },
    /// A distance query parameter was missing, non-finite or negative.
    #[error("invalid query parameter `{name}`: {reason}")]
    InvalidQueryParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Short description of the violated constraint.
        reason: &'static str,
    },
    /// An engine configuration value was unusable.
    #[error("invalid engine configuration `{name}`: {reason}")]
    InvalidConfiguration {
        /// Name of the offending setting.
        name: &'static str,
        /// Short description of the violated constraint.
        reason: &'static str,
    },
}

impl GeoError {
    pub(crate) const fn non_finite(name: &'static str) -> Self {
        Self::InvalidQueryParameter {
            name,
            reason: "must be a finite number",
        }
    }

    pub(crate) const fn negative(name: &'static str) -> Self {
        Self::InvalidQueryParameter {
            name,
            reason: "must not be negative",
        }
    }
}
