//! Dataset adapters for the Proximate engine.
//!
//! Responsibilities:
//! - Decode candidate datasets (JSON arrays in the GeoNames `cities15000`
//!   shape, or objects grouping such arrays by state) into
//!   [`proximate_core::Place`] snapshots.
//! - Provide an offline gazetteer that resolves free-text origins against a
//!   loaded dataset.
//!
//! Boundaries:
//! - Do not encode search rules (those live in `proximate-core`).
//! - Records with unusable coordinates are skipped with a warning; a load
//!   never fabricates fallback records.

#![forbid(unsafe_code)]

mod dataset;
mod resolver;
mod source;

pub use dataset::{DatasetError, load_places, parse_places};
pub use resolver::GazetteerResolver;
pub use source::JsonPlaceSource;
