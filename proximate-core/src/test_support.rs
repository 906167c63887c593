//! Test-only, in-memory collaborators used by unit and behaviour tests.

use std::collections::HashMap;
use std::convert::Infallible;

use crate::{Coordinate, OriginResolver, Place, PlaceSource, ResolvedOrigin, slugify};

/// Build a place, panicking on an invalid coordinate.
///
/// # Panics
/// Panics when `latitude` or `longitude` is out of range.
#[must_use]
pub fn place(name: &str, latitude: f64, longitude: f64) -> Place {
    match Coordinate::new(latitude, longitude) {
        Ok(coordinate) => Place::new(name, coordinate),
        Err(err) => panic!("fixture place {name}: {err}"),
    }
}

/// In-memory `PlaceSource` returning a clone of its records.
#[derive(Default, Debug, Clone)]
pub struct MemorySource {
    places: Vec<Place>,
}

impl MemorySource {
    /// Create a source from a collection of places.
    #[must_use]
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            places: places.into_iter().collect(),
        }
    }
}

impl PlaceSource for MemorySource {
    type Error = Infallible;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        Ok(self.places.clone())
    }
}

/// `OriginResolver` backed by a fixed slug-to-origin table.
#[derive(Default, Debug, Clone)]
pub struct FixedResolver {
    origins: HashMap<String, ResolvedOrigin>,
}

impl FixedResolver {
    /// Register `place` under the slug of its name.
    #[must_use]
    pub fn with_place(mut self, place: &Place) -> Self {
        self.origins.insert(
            place.slug(),
            ResolvedOrigin {
                display_name: place.name.clone(),
                coordinate: place.coordinate,
            },
        );
        self
    }
}

impl OriginResolver for FixedResolver {
    fn resolve(&self, query: &str) -> Option<ResolvedOrigin> {
        self.origins.get(&slugify(query)).cloned()
    }
}
