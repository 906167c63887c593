//! The proximity search engine.
//!
//! A search is a single filter-sort-cap pass:
//!
//! 1. Convert the target and tolerance to kilometres.
//! 2. Compute each candidate's great-circle distance from the origin.
//! 3. Keep candidates whose deviation from the target is within tolerance.
//! 4. Order by deviation, breaking ties by input position.
//! 5. Truncate to the result cap.
//!
//! The engine holds no mutable state, so one instance can serve concurrent
//! requests.

use std::cmp::Ordering;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    Coordinate, DEFAULT_TOLERANCE, DistanceQuery, DistanceUnit, EARTH_RADIUS_KM, GeoError,
    MAX_TOLERANCE_MILES, Place, PlaceIndex, QueryParams, TravelEstimates, TravelSpeeds,
    great_circle_distance_km, km_to_miles, km_to_nautical_miles,
};

/// Default maximum number of band-search results.
pub const DEFAULT_RESULT_CAP: usize = 200;

/// Default number of places returned by nearest-place lookups.
pub const DEFAULT_NEAREST_LIMIT: usize = 6;

/// Tunables for a [`ProximityEngine`].
///
/// Nothing in the engine reads global state; every constant it relies on is
/// carried here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Sphere radius used for great-circle distances, in kilometres.
    pub earth_radius_km: f64,
    /// Maximum number of band-search results.
    pub result_cap: usize,
    /// Maximum number of nearest-place results.
    pub nearest_limit: usize,
    /// Tolerance applied when a request omits one, in the request unit.
    pub default_tolerance: f64,
    /// Tolerance ceiling in miles, converted to the request unit when clamping.
    pub max_tolerance_miles: f64,
    /// Average speeds used for travel estimates.
    pub travel_speeds: TravelSpeeds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            result_cap: DEFAULT_RESULT_CAP,
            nearest_limit: DEFAULT_NEAREST_LIMIT,
            default_tolerance: DEFAULT_TOLERANCE,
            max_tolerance_miles: MAX_TOLERANCE_MILES,
            travel_speeds: TravelSpeeds::default(),
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), GeoError> {
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(GeoError::InvalidConfiguration {
                name: "earth_radius_km",
                reason: "must be a positive finite number",
            });
        }
        if !(self.default_tolerance.is_finite() && self.default_tolerance >= 0.0) {
            return Err(GeoError::InvalidConfiguration {
                name: "default_tolerance",
                reason: "must be a non-negative finite number",
            });
        }
        if !(self.max_tolerance_miles.is_finite() && self.max_tolerance_miles >= 0.0) {
            return Err(GeoError::InvalidConfiguration {
                name: "max_tolerance_miles",
                reason: "must be a non-negative finite number",
            });
        }
        Ok(())
    }
}

/// A place matched by a search, with its distance computed once in both
/// units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedResult {
    /// The matched place.
    pub place: Place,
    /// Great-circle distance from the origin in kilometres.
    pub distance_km: f64,
    /// The same distance in statute miles.
    pub distance_miles: f64,
    /// Absolute difference between `distance_km` and the target, in
    /// kilometres. Nearest-place lookups use a target of zero, so the
    /// deviation equals the distance.
    pub deviation: f64,
}

impl RankedResult {
    /// Distance expressed in `unit`.
    #[must_use]
    pub fn distance_in(&self, unit: DistanceUnit) -> f64 {
        unit.from_km(self.distance_km)
    }
}

/// Distance between two points in every supported unit, with travel
/// estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceSummary {
    /// Start point.
    pub from: Coordinate,
    /// End point.
    pub to: Coordinate,
    /// Great-circle distance in kilometres.
    pub kilometres: f64,
    /// Great-circle distance in statute miles.
    pub miles: f64,
    /// Great-circle distance in nautical miles.
    pub nautical_miles: f64,
    /// Travel-time estimates over the great-circle distance.
    pub travel: TravelEstimates,
}

/// Candidate that survived filtering, keyed by its input position.
#[derive(Debug, Clone, Copy)]
struct Scored<'a> {
    ordinal: usize,
    place: &'a Place,
    distance_km: f64,
    deviation: f64,
}

impl Scored<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        self.deviation
            .total_cmp(&other.deviation)
            .then(self.ordinal.cmp(&other.ordinal))
    }

    fn into_result(self) -> RankedResult {
        RankedResult {
            place: self.place.clone(),
            distance_km: self.distance_km,
            distance_miles: km_to_miles(self.distance_km),
            deviation: self.deviation,
        }
    }
}

/// Stateless, re-entrant proximity search over candidate snapshots.
///
/// # Examples
///
/// ```
/// use proximate_core::{Coordinate, DistanceQuery, DistanceUnit, Place, ProximityEngine};
///
/// # fn main() -> Result<(), proximate_core::GeoError> {
/// let engine = ProximityEngine::default();
/// let los_angeles = Coordinate::new(34.0522, -118.2437)?;
/// let places = vec![
///     Place::new("San Diego", Coordinate::new(32.7157, -117.1611)?),
///     Place::new("Las Vegas", Coordinate::new(36.1699, -115.1398)?),
/// ];
/// let query = DistanceQuery::new(los_angeles, 180.0, 10.0, DistanceUnit::Kilometres)?;
/// let results = engine.find_places_near_distance(&query, &places);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].place.name, "San Diego");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProximityEngine {
    config: EngineConfig,
}

impl ProximityEngine {
    /// Build an engine from explicit configuration.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidConfiguration`] when the radius or
    /// tolerance settings are unusable.
    pub fn new(config: EngineConfig) -> Result<Self, GeoError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Great-circle distance on the configured sphere, in kilometres.
    #[must_use]
    pub fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        great_circle_distance_km(a, b, self.config.earth_radius_km)
    }

    /// Apply the configured default and clamp to raw request parameters.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidQueryParameter`] as described on
    /// [`QueryParams::resolve_with`].
    pub fn resolve_query(
        &self,
        origin: Coordinate,
        params: QueryParams,
    ) -> Result<DistanceQuery, GeoError> {
        params.resolve_with(
            origin,
            self.config.default_tolerance,
            self.config.max_tolerance_miles,
        )
    }

    /// Places whose distance from the query origin lies within the tolerance
    /// band, capped at the configured result cap.
    #[must_use]
    pub fn find_places_near_distance(
        &self,
        query: &DistanceQuery,
        candidates: &[Place],
    ) -> Vec<RankedResult> {
        self.find_places_near_distance_with_cap(query, candidates, self.config.result_cap)
    }

    /// As [`ProximityEngine::find_places_near_distance`] with an explicit cap.
    #[must_use]
    pub fn find_places_near_distance_with_cap(
        &self,
        query: &DistanceQuery,
        candidates: &[Place],
        cap: usize,
    ) -> Vec<RankedResult> {
        let pairs: Vec<(usize, &Place)> = candidates.iter().enumerate().collect();
        self.rank_band(query, &pairs, cap)
    }

    /// Band search over an indexed snapshot.
    ///
    /// Only candidates inside the rectangle enclosing `target + tolerance`
    /// are measured. The result equals a linear search over
    /// [`PlaceIndex::places`].
    #[must_use]
    pub fn find_places_near_distance_indexed(
        &self,
        query: &DistanceQuery,
        index: &PlaceIndex,
    ) -> Vec<RankedResult> {
        let outer_km = query.target_km() + query.tolerance_km();
        let pairs = index.candidates_within(query.origin(), outer_km, self.config.earth_radius_km);
        debug!(
            "spatial pre-filter kept {} of {} places",
            pairs.len(),
            index.len()
        );
        self.rank_band(query, &pairs, self.config.result_cap)
    }

    /// The closest places to `origin`, nearest first.
    ///
    /// Places whose slug equals `exclude_slug` are skipped so an origin taken
    /// from the dataset does not list itself. Returns at most the configured
    /// nearest limit.
    #[must_use]
    pub fn nearest_places(
        &self,
        origin: Coordinate,
        candidates: &[Place],
        exclude_slug: Option<&str>,
    ) -> Vec<RankedResult> {
        self.nearest_places_with_limit(origin, candidates, exclude_slug, self.config.nearest_limit)
    }

    /// As [`ProximityEngine::nearest_places`] with an explicit limit.
    #[must_use]
    pub fn nearest_places_with_limit(
        &self,
        origin: Coordinate,
        candidates: &[Place],
        exclude_slug: Option<&str>,
        limit: usize,
    ) -> Vec<RankedResult> {
        let mut scored: Vec<Scored<'_>> = candidates
            .iter()
            .enumerate()
            .filter(|(_, place)| exclude_slug.is_none_or(|slug| place.slug() != slug))
            .map(|(ordinal, place)| {
                let distance_km = self.distance_km(origin, place.coordinate);
                Scored {
                    ordinal,
                    place,
                    distance_km,
                    deviation: distance_km,
                }
            })
            .collect();
        scored.sort_by(Scored::rank);
        scored.truncate(limit);
        scored.into_iter().map(Scored::into_result).collect()
    }

    /// Distance between two points in every unit, with travel estimates.
    #[must_use]
    pub fn measure(&self, from: Coordinate, to: Coordinate) -> DistanceSummary {
        let kilometres = self.distance_km(from, to);
        DistanceSummary {
            from,
            to,
            kilometres,
            miles: km_to_miles(kilometres),
            nautical_miles: km_to_nautical_miles(kilometres),
            travel: self.config.travel_speeds.estimate(kilometres),
        }
    }

    fn score_in_band<'a>(
        &self,
        origin: Coordinate,
        target_km: f64,
        tolerance_km: f64,
        ordinal: usize,
        place: &'a Place,
    ) -> Option<Scored<'a>> {
        let distance_km = self.distance_km(origin, place.coordinate);
        let deviation = (distance_km - target_km).abs();
        (deviation <= tolerance_km).then_some(Scored {
            ordinal,
            place,
            distance_km,
            deviation,
        })
    }

    fn rank_band(
        &self,
        query: &DistanceQuery,
        candidates: &[(usize, &Place)],
        cap: usize,
    ) -> Vec<RankedResult> {
        let origin = query.origin();
        let target_km = query.target_km();
        let tolerance_km = query.tolerance_km();

        #[cfg(feature = "parallel")]
        let mut matches: Vec<Scored<'_>> = candidates
            .par_iter()
            .filter_map(|&(ordinal, place)| {
                self.score_in_band(origin, target_km, tolerance_km, ordinal, place)
            })
            .collect();
        #[cfg(not(feature = "parallel"))]
        let mut matches: Vec<Scored<'_>> = candidates
            .iter()
            .filter_map(|&(ordinal, place)| {
                self.score_in_band(origin, target_km, tolerance_km, ordinal, place)
            })
            .collect();

        let in_band = matches.len();
        matches.sort_by(Scored::rank);
        matches.truncate(cap);
        debug!(
            "band search {target_km:.3} km ± {tolerance_km:.3} km: {in_band} of {} candidates in band, returning {}",
            candidates.len(),
            matches.len()
        );
        matches.into_iter().map(Scored::into_result).collect()
    }
}

/// Search `candidates` for places roughly `target_distance` from `origin`
/// using the default engine configuration.
///
/// An empty dataset yields an empty result.
///
/// # Errors
/// Returns [`GeoError::InvalidQueryParameter`] when `target_distance` or
/// `tolerance` is non-finite or negative.
pub fn find_places_near_distance(
    origin: Coordinate,
    candidates: &[Place],
    target_distance: f64,
    tolerance: f64,
    unit: DistanceUnit,
    cap: usize,
) -> Result<Vec<RankedResult>, GeoError> {
    let query = DistanceQuery::new(origin, target_distance, tolerance, unit)?;
    Ok(ProximityEngine::default().find_places_near_distance_with_cap(&query, candidates, cap))
}
