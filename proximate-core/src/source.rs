//! Collaborator traits for the candidate dataset and origin geocoding.
//!
//! The engine never performs I/O. Callers obtain a candidate snapshot from a
//! [`PlaceSource`] and an origin from an [`OriginResolver`] before invoking a
//! search.

use crate::{Coordinate, Place};

/// Read-only access to a snapshot of candidate places.
///
/// Each call returns a fresh snapshot. Implementations skip records with
/// unusable coordinates rather than failing the whole load, and never
/// substitute fabricated records on failure.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use proximate_core::{Coordinate, Place, PlaceSource};
///
/// struct Fixed(Vec<Place>);
///
/// impl PlaceSource for Fixed {
///     type Error = Infallible;
///
///     fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
///         Ok(self.0.clone())
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = Fixed(vec![Place::new("Null Island", Coordinate::new(0.0, 0.0)?)]);
/// assert_eq!(source.load_places()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait PlaceSource {
    /// Error raised when the snapshot cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every candidate place.
    ///
    /// # Errors
    /// Returns `Self::Error` when the underlying dataset cannot be read or
    /// decoded.
    fn load_places(&self) -> Result<Vec<Place>, Self::Error>;
}

/// An origin produced by a geocoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedOrigin {
    /// Name to show the user for this origin.
    pub display_name: String,
    /// Resolved position.
    pub coordinate: Coordinate,
}

/// Resolve free-text place names to coordinates.
///
/// Returning `None` means the name could not be resolved; searches for an
/// unresolved origin produce an empty result rather than an error.
pub trait OriginResolver {
    /// Resolve `query` to a coordinate and display name.
    fn resolve(&self, query: &str) -> Option<ResolvedOrigin>;
}
