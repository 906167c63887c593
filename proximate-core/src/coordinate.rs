//! WGS84 coordinate value type.

use geo::Coord;

use crate::GeoError;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// An immutable latitude/longitude pair in degrees.
///
/// Construction validates both axes, so every `Coordinate` in circulation is
/// finite and in range. Conversions to [`geo::Coord`] use `x = longitude` and
/// `y = latitude`.
///
/// # Examples
///
/// ```
/// use proximate_core::{Coordinate, GeoError};
///
/// # fn main() -> Result<(), GeoError> {
/// let los_angeles = Coordinate::new(34.0522, -118.2437)?;
/// assert_eq!(los_angeles.latitude(), 34.0522);
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CoordinateRepr"))]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validate and construct a [`Coordinate`].
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] when either axis is non-finite
    /// or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            x: coordinate.longitude,
            y: coordinate.latitude,
        }
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = GeoError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CoordinateRepr {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<CoordinateRepr> for Coordinate {
    type Error = GeoError;

    fn try_from(repr: CoordinateRepr) -> Result<Self, Self::Error> {
        Self::new(repr.latitude, repr.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_values(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(Coordinate::new(latitude, longitude).is_ok());
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::NAN)]
    #[case(f64::INFINITY, 0.0)]
    #[case(90.000_001, 0.0)]
    #[case(0.0, -180.000_001)]
    fn rejects_invalid_values(#[case] latitude: f64, #[case] longitude: f64) {
        let err = Coordinate::new(latitude, longitude).expect_err("coordinate should be rejected");
        assert!(matches!(err, GeoError::InvalidCoordinate { .. }));
    }

    #[rstest]
    fn converts_to_geo_coord_with_longitude_as_x() {
        let coordinate = Coordinate::new(10.0, 20.0).expect("valid coordinate");
        let coord: Coord<f64> = coordinate.into();
        assert_eq!(coord, Coord { x: 20.0, y: 10.0 });
        assert_eq!(Coordinate::try_from(coord), Ok(coordinate));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialisation_validates_ranges() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#)
            .expect("valid coordinate JSON");
        assert_eq!(ok.longitude(), 2.5);
        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude": 91.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }
}
