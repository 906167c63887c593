//! Core geodesy and proximity search for the Proximate location tools.
//!
//! The crate answers "which places are about N miles from here?". It has two
//! layers:
//! - **Geodesy utilities**: haversine distance, unit conversion, and slug and
//!   display-name normalisation. Pure functions with no state.
//! - **Proximity search**: [`ProximityEngine`] filters a candidate snapshot
//!   to a tolerance band around a target distance, ranks by deviation and
//!   caps the result.
//!
//! Inputs are validated on construction. [`Coordinate::new`] and
//! [`DistanceQuery::new`] return `Result` so malformed numbers never reach
//! the ranking code. Geocoding and dataset loading are collaborators behind
//! the [`OriginResolver`] and [`PlaceSource`] traits; the engine itself never
//! performs I/O.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
mod engine;
mod error;
mod geodesy;
mod index;
mod place;
mod query;
mod source;
mod text;
mod travel;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use engine::{
    DEFAULT_NEAREST_LIMIT, DEFAULT_RESULT_CAP, DistanceSummary, EngineConfig, ProximityEngine,
    RankedResult, find_places_near_distance,
};
pub use error::GeoError;
pub use geodesy::{
    EARTH_RADIUS_KM, MILES_PER_KM, NAUTICAL_MILES_PER_KM, degrees_to_radians,
    great_circle_distance_km, haversine_distance_km, km_to_miles, km_to_nautical_miles,
    miles_to_km,
};
pub use index::{PlaceIndex, search_bounds};
pub use place::Place;
pub use query::{
    DEFAULT_TOLERANCE, DistanceQuery, DistanceUnit, MAX_TOLERANCE_MILES, ParseDistanceUnitError,
    QueryParams,
};
pub use source::{OriginResolver, PlaceSource, ResolvedOrigin};
pub use text::{slug_to_display, slugify, title_case};
pub use travel::{TravelEstimate, TravelEstimates, TravelMode, TravelSpeeds};
