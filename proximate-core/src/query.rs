//! Distance query construction and caller-side parameter resolution.
//!
//! [`DistanceQuery`] is the validated input to the proximity engine.
//! [`QueryParams`] models the loosely typed request parameters a web or CLI
//! layer receives and applies the defaults and tolerance clamp that callers
//! owe the engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Coordinate, GeoError, km_to_miles, miles_to_km};

/// Unit in which a caller expresses target distance and tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    /// Kilometres.
    #[cfg_attr(feature = "serde", serde(rename = "km", alias = "kilometres"))]
    Kilometres,
    /// Statute miles.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "mi", alias = "miles"))]
    Miles,
}

impl DistanceUnit {
    /// Convert a value in this unit to kilometres.
    #[must_use]
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            Self::Kilometres => value,
            Self::Miles => miles_to_km(value),
        }
    }

    /// Convert a value in kilometres to this unit.
    #[must_use]
    pub fn from_km(self, km: f64) -> f64 {
        match self {
            Self::Kilometres => km,
            Self::Miles => km_to_miles(km),
        }
    }

    /// Short unit symbol used in labels.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilometres => "km",
            Self::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing a [`DistanceUnit`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown distance unit `{0}`; expected `km` or `mi`")]
pub struct ParseDistanceUnitError(pub String);

impl FromStr for DistanceUnit {
    type Err = ParseDistanceUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometre" | "kilometres" | "kilometer" | "kilometers" => Ok(Self::Kilometres),
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            _ => Err(ParseDistanceUnitError(s.to_owned())),
        }
    }
}

/// A validated "places about N units from here" request.
///
/// # Examples
///
/// ```
/// use proximate_core::{Coordinate, DistanceQuery, DistanceUnit};
///
/// # fn main() -> Result<(), proximate_core::GeoError> {
/// let origin = Coordinate::new(34.0522, -118.2437)?;
/// let query = DistanceQuery::new(origin, 100.0, 5.0, DistanceUnit::Kilometres)?;
/// assert_eq!(query.target_km(), 100.0);
/// assert!(DistanceQuery::new(origin, f64::NAN, 5.0, DistanceUnit::Miles).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceQuery {
    origin: Coordinate,
    target_distance: f64,
    tolerance: f64,
    unit: DistanceUnit,
}

impl DistanceQuery {
    /// Validate and construct a query.
    ///
    /// No clamping happens here; see [`QueryParams::resolve`] for the
    /// caller-side defaults.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidQueryParameter`] when the target distance or
    /// tolerance is non-finite or negative.
    pub fn new(
        origin: Coordinate,
        target_distance: f64,
        tolerance: f64,
        unit: DistanceUnit,
    ) -> Result<Self, GeoError> {
        require_non_negative("target", target_distance)?;
        require_non_negative("tolerance", tolerance)?;
        Ok(Self {
            origin,
            target_distance,
            tolerance,
            unit,
        })
    }

    /// Point the distances are measured from.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Requested distance in the query unit.
    #[must_use]
    pub const fn target_distance(&self) -> f64 {
        self.target_distance
    }

    /// Accepted deviation from the target in the query unit.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Unit of `target_distance` and `tolerance`.
    #[must_use]
    pub const fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Target distance in kilometres.
    #[must_use]
    pub fn target_km(&self) -> f64 {
        self.unit.to_km(self.target_distance)
    }

    /// Tolerance in kilometres.
    #[must_use]
    pub fn tolerance_km(&self) -> f64 {
        self.unit.to_km(self.tolerance)
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), GeoError> {
    if !value.is_finite() {
        return Err(GeoError::non_finite(name));
    }
    if value < 0.0 {
        return Err(GeoError::negative(name));
    }
    Ok(())
}

/// Default tolerance applied when a request omits one, in the query unit.
pub const DEFAULT_TOLERANCE: f64 = 5.0;

/// Largest accepted tolerance, expressed in miles whatever the query unit.
pub const MAX_TOLERANCE_MILES: f64 = 50.0;

/// Raw request parameters prior to validation.
///
/// Every field is optional so web handlers and CLI layers can pass through
/// whatever they received.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryParams {
    /// Requested distance. Required.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<f64>,
    /// Accepted deviation. Defaults to [`DEFAULT_TOLERANCE`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub tolerance: Option<f64>,
    /// Unit for `target` and `tolerance`. Defaults to miles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<DistanceUnit>,
}

impl QueryParams {
    /// Resolve the parameters with the stock defaults and clamp.
    ///
    /// # Errors
    /// See [`QueryParams::resolve_with`].
    pub fn resolve(self, origin: Coordinate) -> Result<DistanceQuery, GeoError> {
        self.resolve_with(origin, DEFAULT_TOLERANCE, MAX_TOLERANCE_MILES)
    }

    /// Resolve the parameters into a [`DistanceQuery`].
    ///
    /// A missing tolerance becomes `default_tolerance`; a finite tolerance is
    /// clamped into `[0, max_tolerance_miles]`, converted into the query unit.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidQueryParameter`] when the target is missing,
    /// non-finite or negative, or when the tolerance is non-finite.
    pub fn resolve_with(
        self,
        origin: Coordinate,
        default_tolerance: f64,
        max_tolerance_miles: f64,
    ) -> Result<DistanceQuery, GeoError> {
        let unit = self.unit.unwrap_or_default();
        let target = self.target.ok_or(GeoError::InvalidQueryParameter {
            name: "target",
            reason: "is required",
        })?;
        let raw_tolerance = self.tolerance.unwrap_or(default_tolerance);
        if !raw_tolerance.is_finite() {
            return Err(GeoError::non_finite("tolerance"));
        }
        let ceiling = unit.from_km(miles_to_km(max_tolerance_miles));
        let tolerance = raw_tolerance.clamp(0.0, ceiling.max(0.0));
        DistanceQuery::new(origin, target, tolerance, unit)
    }
}
