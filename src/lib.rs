//! Facade crate for the Proximate proximity search tools.
//!
//! This crate re-exports the core geodesy and search types and exposes the
//! JSON dataset adapters behind the `data` feature.

#![forbid(unsafe_code)]

pub use proximate_core::{
    Coordinate, DistanceQuery, DistanceSummary, DistanceUnit, EngineConfig, GeoError,
    OriginResolver, Place, PlaceIndex, PlaceSource, ProximityEngine, QueryParams, RankedResult,
    ResolvedOrigin, TravelEstimate, TravelEstimates, TravelMode, TravelSpeeds,
    find_places_near_distance, haversine_distance_km, km_to_miles, km_to_nautical_miles,
    miles_to_km, slug_to_display, slugify, title_case,
};

#[cfg(feature = "data")]
pub use proximate_data::{DatasetError, GazetteerResolver, JsonPlaceSource, load_places, parse_places};
