//! R\*-tree pre-filter for band searches over large candidate snapshots.
//!
//! The index narrows a search to the longitude/latitude rectangle enclosing
//! the outer search radius. The exact haversine band test still runs on every
//! surviving candidate, so an indexed search returns the same places in the
//! same order as a linear scan over the snapshot.

use std::f64::consts::FRAC_PI_2;

use geo::{Coord, Rect};
use log::debug;
use rstar::{AABB, RTree, RTreeObject};

use crate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE, Place, degrees_to_radians};

/// Slack added to each side of a search rectangle, in degrees.
const BOUNDS_PADDING_DEGREES: f64 = 1e-6;

/// Position of a place within the snapshot, keyed by its input ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPlace {
    ordinal: usize,
    position: [f64; 2],
}

impl RTreeObject for IndexedPlace {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// An immutable candidate snapshot with a spatial index over it.
///
/// # Examples
///
/// ```
/// use geo::{Coord, Rect};
/// use proximate_core::{Coordinate, Place, PlaceIndex};
///
/// # fn main() -> Result<(), proximate_core::GeoError> {
/// let index = PlaceIndex::new(vec![
///     Place::new("Centre", Coordinate::new(0.0, 0.0)?),
///     Place::new("Far", Coordinate::new(40.0, 40.0)?),
/// ]);
/// let bbox = Rect::new(Coord { x: -1.0, y: -1.0 }, Coord { x: 1.0, y: 1.0 });
/// let names: Vec<_> = index.places_in_bbox(&bbox).map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Centre"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlaceIndex {
    places: Vec<Place>,
    tree: RTree<IndexedPlace>,
}

impl PlaceIndex {
    /// Bulk-load an index over `places`, keeping their input order.
    #[must_use]
    pub fn new(places: Vec<Place>) -> Self {
        let entries = places
            .iter()
            .enumerate()
            .map(|(ordinal, place)| IndexedPlace {
                ordinal,
                position: [place.coordinate.longitude(), place.coordinate.latitude()],
            })
            .collect();
        Self {
            places,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed places.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// The snapshot in input order.
    #[must_use]
    pub const fn places(&self) -> &[Place] {
        self.places.as_slice()
    }

    /// Input ordinals of the places inside `bbox`, ascending.
    ///
    /// Boundary points are included. The rectangle uses `x = longitude`,
    /// `y = latitude` and does not wrap across the antimeridian.
    #[must_use]
    pub fn ordinals_in_bbox(&self, bbox: &Rect<f64>) -> Vec<usize> {
        let envelope =
            AABB::from_corners([bbox.min().x, bbox.min().y], [bbox.max().x, bbox.max().y]);
        let mut ordinals: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.ordinal)
            .collect();
        ordinals.sort_unstable();
        ordinals
    }

    /// Places inside `bbox`, in input order.
    pub fn places_in_bbox(&self, bbox: &Rect<f64>) -> impl Iterator<Item = &Place> + '_ {
        self.ordinals_in_bbox(bbox)
            .into_iter()
            .filter_map(move |ordinal| self.places.get(ordinal))
    }

    /// Candidates a band search around `origin` must consider, paired with
    /// their input ordinals.
    ///
    /// Falls back to the whole snapshot when no bounding rectangle can
    /// enclose the search radius.
    pub(crate) fn candidates_within(
        &self,
        origin: Coordinate,
        radius_km: f64,
        earth_radius_km: f64,
    ) -> Vec<(usize, &Place)> {
        match search_bounds(origin, radius_km, earth_radius_km) {
            Some(bbox) => self
                .ordinals_in_bbox(&bbox)
                .into_iter()
                .filter_map(|ordinal| self.places.get(ordinal).map(|place| (ordinal, place)))
                .collect(),
            None => {
                debug!(
                    "search radius {radius_km:.3} km around {origin:?} has no bounding rectangle; scanning all {} places",
                    self.places.len()
                );
                self.places.iter().enumerate().collect()
            }
        }
    }
}

/// Longitude/latitude rectangle enclosing every point within `radius_km` of
/// `origin` on a sphere of `earth_radius_km`.
///
/// Returns `None` when the enclosed cap reaches a pole, crosses the
/// antimeridian, or spans a hemisphere or more; callers must scan everything
/// in that case.
#[must_use]
pub fn search_bounds(origin: Coordinate, radius_km: f64, earth_radius_km: f64) -> Option<Rect<f64>> {
    if !(radius_km.is_finite() && radius_km >= 0.0 && earth_radius_km > 0.0) {
        return None;
    }
    let angular = radius_km / earth_radius_km;
    if angular >= FRAC_PI_2 {
        return None;
    }

    let latitude = origin.latitude();
    let lat_delta = angular.to_degrees() + BOUNDS_PADDING_DEGREES;
    let min_lat = latitude - lat_delta;
    let max_lat = latitude + lat_delta;
    if !(LATITUDE_RANGE.contains(&min_lat) && LATITUDE_RANGE.contains(&max_lat)) {
        return None;
    }

    let ratio = angular.sin() / degrees_to_radians(latitude).cos();
    if ratio.is_nan() || ratio >= 1.0 {
        return None;
    }
    let lon_delta = ratio.asin().to_degrees() + BOUNDS_PADDING_DEGREES;
    let min_lon = origin.longitude() - lon_delta;
    let max_lon = origin.longitude() + lon_delta;
    if !(LONGITUDE_RANGE.contains(&min_lon) && LONGITUDE_RANGE.contains(&max_lon)) {
        return None;
    }

    Some(Rect::new(
        Coord {
            x: min_lon,
            y: min_lat,
        },
        Coord {
            x: max_lon,
            y: max_lat,
        },
    ))
}
