//! File-backed [`PlaceSource`].

use camino::{Utf8Path, Utf8PathBuf};
use proximate_core::{Place, PlaceSource};

use crate::{DatasetError, load_places};

/// Loads a fresh snapshot from a JSON dataset file on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPlaceSource {
    path: Utf8PathBuf,
}

impl JsonPlaceSource {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the dataset file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl PlaceSource for JsonPlaceSource {
    type Error = DatasetError;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        load_places(&self.path)
    }
}
