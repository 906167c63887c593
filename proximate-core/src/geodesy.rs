//! Great-circle distance and unit conversion helpers.
//!
//! Every function here is pure and total over its typed inputs. Inputs are
//! [`Coordinate`] values, so range validation has already happened by the
//! time a distance is computed.

use std::f64::consts::PI;

use crate::Coordinate;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Statute miles per kilometre.
pub const MILES_PER_KM: f64 = 0.621_371;

/// Nautical miles per kilometre.
pub const NAUTICAL_MILES_PER_KM: f64 = 0.539_957;

/// Convert degrees to radians.
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Great-circle distance between two coordinates on a sphere of
/// [`EARTH_RADIUS_KM`].
///
/// The result is symmetric, never negative, and zero for identical points.
///
/// # Examples
///
/// ```
/// use proximate_core::{Coordinate, haversine_distance_km};
///
/// # fn main() -> Result<(), proximate_core::GeoError> {
/// let los_angeles = Coordinate::new(34.0522, -118.2437)?;
/// let san_diego = Coordinate::new(32.7157, -117.1611)?;
/// let km = haversine_distance_km(los_angeles, san_diego);
/// assert!((km - 179.4).abs() < 2.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    great_circle_distance_km(a, b, EARTH_RADIUS_KM)
}

/// Great-circle distance on a sphere of the given radius, in the radius' unit.
///
/// Longitude wraparound needs no special casing: the trigonometric terms are
/// periodic.
#[must_use]
pub fn great_circle_distance_km(a: Coordinate, b: Coordinate, radius_km: f64) -> f64 {
    let d_lat = degrees_to_radians(b.latitude() - a.latitude());
    let d_lon = degrees_to_radians(b.longitude() - a.longitude());
    let h = (d_lat / 2.0).sin().powi(2)
        + degrees_to_radians(a.latitude()).cos()
            * degrees_to_radians(b.latitude()).cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    2.0 * radius_km * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Convert kilometres to statute miles.
#[must_use]
pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// Convert statute miles to kilometres.
#[must_use]
pub fn miles_to_km(miles: f64) -> f64 {
    miles / MILES_PER_KM
}

/// Convert kilometres to nautical miles.
#[must_use]
pub fn km_to_nautical_miles(km: f64) -> f64 {
    km * NAUTICAL_MILES_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).expect("valid coordinate")
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(180.0, PI)]
    #[case(-90.0, -PI / 2.0)]
    fn converts_degrees(#[case] degrees: f64, #[case] radians: f64) {
        assert!((degrees_to_radians(degrees) - radians).abs() < 1e-12);
    }

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = coord(51.5074, -0.1278);
        assert_eq!(haversine_distance_km(point, point), 0.0);
    }

    #[rstest]
    fn los_angeles_to_san_diego_is_about_180_km() {
        let km = haversine_distance_km(coord(34.0522, -118.2437), coord(32.7157, -117.1611));
        assert!((km - 179.4).abs() < 2.0, "unexpected distance {km}");
    }

    #[rstest]
    fn quarter_meridian_matches_sphere_geometry() {
        let km = haversine_distance_km(coord(0.0, 0.0), coord(90.0, 0.0));
        assert!((km - EARTH_RADIUS_KM * PI / 2.0).abs() < 1e-6);
    }

    #[rstest]
    fn antipodal_points_stay_finite() {
        let km = haversine_distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!(km.is_finite());
        assert!((km - EARTH_RADIUS_KM * PI).abs() < 1e-6);
    }

    #[rstest]
    fn crossing_the_antimeridian_takes_the_short_way() {
        let km = haversine_distance_km(coord(0.0, 179.5), coord(0.0, -179.5));
        let one_degree = EARTH_RADIUS_KM * PI / 180.0;
        assert!((km - one_degree).abs() < 1e-6);
    }

    #[rstest]
    fn pole_distance_ignores_longitude() {
        let a = haversine_distance_km(coord(90.0, 0.0), coord(45.0, 10.0));
        let b = haversine_distance_km(coord(90.0, 120.0), coord(45.0, 10.0));
        assert!((a - b).abs() < 1e-9);
    }

    #[rstest]
    fn radius_scales_distance() {
        let a = coord(10.0, 10.0);
        let b = coord(20.0, 20.0);
        let unit = great_circle_distance_km(a, b, 1.0);
        assert!((great_circle_distance_km(a, b, 2.0) - 2.0 * unit).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(180.0)]
    #[case(12_345.678)]
    fn mile_conversion_round_trips(#[case] km: f64) {
        assert!((miles_to_km(km_to_miles(km)) - km).abs() < 1e-9);
    }

    #[rstest]
    fn nautical_miles_use_fixed_factor() {
        assert!((km_to_nautical_miles(100.0) - 53.9957).abs() < 1e-9);
    }
}
