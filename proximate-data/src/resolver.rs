//! Offline origin resolution against a loaded dataset.

use log::debug;
use proximate_core::{OriginResolver, Place, PlaceSource, ResolvedOrigin, slugify};

/// Resolves free-text origins by slug against a place snapshot.
///
/// A query matches a place when its slug equals the slug of the place name,
/// of `"name admin1"`, or of the full label. The first match in dataset order
/// wins.
///
/// # Examples
/// ```
/// use proximate_core::{Coordinate, OriginResolver, Place};
/// use proximate_data::GazetteerResolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let springfield = Place::new("Springfield", Coordinate::new(39.7817, -89.6501)?)
///     .with_admin_region("Illinois");
/// let resolver = GazetteerResolver::new(vec![springfield]);
/// let origin = resolver.resolve("Springfield, Illinois").expect("known place");
/// assert_eq!(origin.display_name, "Springfield, Illinois");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GazetteerResolver {
    places: Vec<Place>,
}

impl GazetteerResolver {
    /// Build a resolver over `places`.
    #[must_use]
    pub const fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Build a resolver from a fresh snapshot of `source`.
    ///
    /// # Errors
    /// Propagates the source's load error.
    pub fn from_source<S: PlaceSource>(source: &S) -> Result<Self, S::Error> {
        source.load_places().map(Self::new)
    }

    /// The places this resolver searches.
    #[must_use]
    pub const fn places(&self) -> &[Place] {
        self.places.as_slice()
    }

    /// Give back the searched places.
    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }

    /// The first place matching `query`, if any.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&Place> {
        let slug = slugify(query);
        if slug.is_empty() {
            return None;
        }
        let found = self.places.iter().find(|place| Self::matches(place, &slug));
        if found.is_none() {
            debug!("no gazetteer entry for slug {slug}");
        }
        found
    }

    fn matches(place: &Place, slug: &str) -> bool {
        if place.slug() == slug || slugify(&place.label()) == slug {
            return true;
        }
        place
            .admin_region
            .as_deref()
            .is_some_and(|admin| slugify(&format!("{} {admin}", place.name)) == slug)
    }
}

impl OriginResolver for GazetteerResolver {
    fn resolve(&self, query: &str) -> Option<ResolvedOrigin> {
        self.find(query).map(|place| ResolvedOrigin {
            display_name: place.label(),
            coordinate: place.coordinate,
        })
    }
}
