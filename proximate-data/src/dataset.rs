//! JSON dataset decoding.

use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::{debug, warn};
use proximate_core::{Coordinate, Place};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while loading a place dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path}: {source}")]
    Open {
        /// Path that was opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The payload was not valid JSON.
    #[error("failed to parse dataset JSON: {source}")]
    Parse {
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The top-level JSON value was neither an array of records nor an
    /// object of record arrays.
    #[error("dataset must be a JSON array of places, found {found}")]
    NotAnArray {
        /// Kind of JSON value found instead.
        found: &'static str,
    },
    /// A region group in a grouped dataset was not an array of records.
    #[error("dataset group {group:?} must be an array of places, found {found}")]
    InvalidGroup {
        /// Key of the offending group.
        group: String,
        /// Kind of JSON value found instead.
        found: &'static str,
    },
}

/// GeoNames exports carry coordinates either as numbers or numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lat: Option<Number>,
    #[serde(default, alias = "lng")]
    lon: Option<Number>,
    #[serde(default, alias = "region", alias = "admin_region", alias = "state")]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl RawPlace {
    fn into_place(self) -> Result<Place, String> {
        let name = self
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| "missing name".to_owned())?;
        let latitude = self
            .lat
            .as_ref()
            .and_then(Number::value)
            .ok_or_else(|| "missing or non-numeric latitude".to_owned())?;
        let longitude = self
            .lon
            .as_ref()
            .and_then(Number::value)
            .ok_or_else(|| "missing or non-numeric longitude".to_owned())?;
        let coordinate = Coordinate::new(latitude, longitude).map_err(|err| err.to_string())?;

        let mut place = Place::new(name, coordinate);
        if let Some(admin1) = non_blank(self.admin1) {
            place = place.with_admin_region(admin1);
        }
        if let Some(country) = non_blank(self.country) {
            place = place.with_country(country);
        }
        Ok(place)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A record paired with its position in the dataset and, for grouped
/// datasets, the key of the group it came from.
struct Entry {
    group: Option<String>,
    index: usize,
    record: Value,
}

fn entries(value: Value) -> Result<Vec<Entry>, DatasetError> {
    match value {
        Value::Array(records) => Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Entry {
                group: None,
                index,
                record,
            })
            .collect()),
        Value::Object(groups) => {
            let mut flattened = Vec::new();
            for (group, records) in groups {
                let Value::Array(records) = records else {
                    return Err(DatasetError::InvalidGroup {
                        found: kind(&records),
                        group,
                    });
                };
                flattened.extend(records.into_iter().enumerate().map(|(index, record)| {
                    Entry {
                        group: Some(group.clone()),
                        index,
                        record,
                    }
                }));
            }
            Ok(flattened)
        }
        other => Err(DatasetError::NotAnArray {
            found: kind(&other),
        }),
    }
}

fn decode(entry: Entry) -> Option<Place> {
    let Entry {
        group,
        index,
        record,
    } = entry;
    let decoded = serde_json::from_value::<RawPlace>(record)
        .map_err(|err| err.to_string())
        .and_then(|mut raw| {
            if non_blank(raw.admin1.clone()).is_none() {
                raw.admin1.clone_from(&group);
            }
            raw.into_place()
        });
    match decoded {
        Ok(place) => Some(place),
        Err(reason) => {
            match group {
                Some(group) => warn!("skipping dataset record {group}[{index}]: {reason}"),
                None => warn!("skipping dataset record {index}: {reason}"),
            }
            None
        }
    }
}

/// Decode place records from `reader`.
///
/// The payload is either a JSON array of records or an object grouping
/// record arrays by region, e.g. `{"Colorado": [...]}`. Grouped datasets are
/// flattened in sorted key order and the key becomes the admin region of
/// records that carry none.
///
/// Records that lack a name or a usable coordinate are skipped and logged at
/// `warn` level with their index.
///
/// # Errors
/// Returns [`DatasetError::Parse`] for malformed JSON,
/// [`DatasetError::NotAnArray`] when the top-level value is neither an array
/// nor an object, and [`DatasetError::InvalidGroup`] when a group is not an
/// array.
///
/// # Examples
/// ```
/// use proximate_data::parse_places;
///
/// let json = r#"[{"name": "Denver", "lat": "39.7392", "lng": -104.9903}]"#;
/// let places = parse_places(json.as_bytes()).expect("valid dataset");
/// assert_eq!(places[0].name, "Denver");
/// ```
pub fn parse_places<R: Read>(reader: R) -> Result<Vec<Place>, DatasetError> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|source| DatasetError::Parse { source })?;
    let records = entries(value)?;
    let total = records.len();
    let places: Vec<Place> = records.into_iter().filter_map(decode).collect();
    debug!("decoded {} of {total} dataset records", places.len());
    Ok(places)
}

/// Open `path` and decode it with [`parse_places`].
///
/// # Errors
/// Returns [`DatasetError::Open`] when the file cannot be opened, otherwise
/// the errors of [`parse_places`].
pub fn load_places(path: &Utf8Path) -> Result<Vec<Place>, DatasetError> {
    let file =
        fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
            DatasetError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
    debug!("loading places from {path}");
    parse_places(BufReader::new(file))
}
