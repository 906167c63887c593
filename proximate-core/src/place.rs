//! Populated places and their display labels.

use crate::{Coordinate, slugify};

/// A populated place that may appear in a proximity search.
///
/// Places are read-only snapshots of a cities dataset. The region and country
/// are free-form strings exactly as the dataset supplies them.
///
/// # Examples
/// ```
/// use proximate_core::{Coordinate, Place};
///
/// # fn main() -> Result<(), proximate_core::GeoError> {
/// let place = Place::new("San Diego", Coordinate::new(32.7157, -117.1611)?)
///     .with_admin_region("California")
///     .with_country("US");
///
/// assert_eq!(place.label(), "San Diego, California, US");
/// assert_eq!(place.slug(), "san-diego");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Display name of the place.
    pub name: String,
    /// Position of the place.
    pub coordinate: Coordinate,
    /// First-level administrative region (state, province), if known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub admin_region: Option<String>,
    /// Country name or code, if known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub country: Option<String>,
}

impl Place {
    /// Construct a place with no region or country.
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            admin_region: None,
            country: None,
        }
    }

    /// Attach a first-level administrative region.
    #[must_use]
    pub fn with_admin_region(mut self, admin_region: impl Into<String>) -> Self {
        self.admin_region = Some(admin_region.into());
        self
    }

    /// Attach a country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Human-readable `name[, region][, country]` label.
    #[must_use]
    pub fn label(&self) -> String {
        [
            Some(self.name.as_str()),
            self.admin_region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// URL slug derived from the place name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}
