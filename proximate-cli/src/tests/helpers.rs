//! Test helpers for writing place datasets to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Colorado Front Range cities plus Cheyenne, Wyoming.
const FRONT_RANGE: &str = r#"[
    {"name": "Denver", "lat": 39.7392, "lon": -104.9903, "admin1": "Colorado", "country": "US"},
    {"name": "Boulder", "lat": "40.01499", "lon": "-105.27055", "admin1": "Colorado", "country": "US"},
    {"name": "Colorado Springs", "lat": 38.8339, "lon": -104.8214, "admin1": "Colorado", "country": "US"},
    {"name": "Cheyenne", "lat": 41.1400, "lng": -104.8202, "region": "Wyoming", "country": "US"},
    {"name": "Pueblo", "lat": 38.2544, "lon": -104.6091, "admin1": "Colorado", "country": "US"},
    {"name": "Fort Collins", "lat": 40.5853, "lon": -105.0844, "admin1": "Colorado", "country": "US"},
    {"name": "Lost Record", "lon": -105.0}
]"#;

#[derive(Debug)]
pub(super) struct DatasetFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl DatasetFile {
    pub(super) fn front_range() -> Self {
        Self::with_contents(FRONT_RANGE)
    }

    pub(super) fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp directory");
        let path = root.join("places.json");
        fs::write(&path, contents).expect("write dataset file");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}

pub(super) fn result_names(results: &[proximate_core::RankedResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.place.name.as_str())
        .collect()
}
