//! Reference catalog files.
//!
//! A catalog is exchanged as one JSON document:
//!
//! ```json
//! {
//!   "hotels": [{"city": "Fes", "name": "Riad Fes", "price": 900.0}],
//!   "activities": [{"city": "Fes", "name": "Tanneries", "price": 50.0}],
//!   "distances": [{"from": "Rabat", "to": "Fes", "distance": 210.0}]
//! }
//! ```
//!
//! Every section is optional. [`load_catalog_json`] reads and validates such
//! a file into a [`ReferenceCatalog`]; [`persist_catalog_to_sqlite`] writes a
//! catalog into the SQLite layout that
//! [`caravan_core::SqliteReferenceStore`] opens.

mod sqlite;

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::{ActivityEntry, DistanceEntry, HotelEntry, ReferenceCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fs::open_utf8_file;

pub use sqlite::{PersistCatalogError, persist_catalog_to_sqlite};

/// Errors raised while loading a JSON catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("failed to open catalog at {path:?}")]
    Open {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid catalog document.
    #[error("failed to parse catalog JSON at {path:?}")]
    Parse {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// An entry names no city or carries an empty name.
    #[error("{section} entry {index} has a blank city or name")]
    BlankName {
        /// Catalog section holding the entry.
        section: &'static str,
        /// Position of the entry inside its section.
        index: usize,
    },
    /// A price or distance was negative or not finite.
    #[error("{section} entry {index} has invalid value {value}")]
    InvalidValue {
        /// Catalog section holding the entry.
        section: &'static str,
        /// Position of the entry inside its section.
        index: usize,
        /// Offending value.
        value: f64,
    },
}

/// Serialised form of a reference catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Hotels across every city.
    #[serde(default)]
    pub hotels: Vec<HotelEntry>,
    /// Activities across every city.
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    /// Directed city-to-city distances.
    #[serde(default)]
    pub distances: Vec<DistanceEntry>,
}

impl CatalogFile {
    /// Check names and numbers before the entries reach a planner.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::InvalidValue`]
    /// for the first offending entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_section(
            "hotels",
            self.hotels
                .iter()
                .map(|hotel| ([hotel.city.as_str(), hotel.name.as_str()], hotel.price)),
        )?;
        check_section(
            "activities",
            self.activities.iter().map(|activity| {
                (
                    [activity.city.as_str(), activity.name.as_str()],
                    activity.price,
                )
            }),
        )?;
        check_section(
            "distances",
            self.distances
                .iter()
                .map(|entry| ([entry.from.as_str(), entry.to.as_str()], entry.distance)),
        )
    }

    /// Group the entries into an in-memory catalog.
    #[must_use]
    pub fn into_catalog(self) -> ReferenceCatalog {
        ReferenceCatalog::new(self.hotels, self.activities, self.distances)
    }
}

impl From<&ReferenceCatalog> for CatalogFile {
    fn from(catalog: &ReferenceCatalog) -> Self {
        Self {
            hotels: catalog.all_hotels(),
            activities: catalog.all_activities(),
            distances: catalog.distances().entries(),
        }
    }
}

fn check_section<'a, I>(section: &'static str, entries: I) -> Result<(), CatalogError>
where
    I: IntoIterator<Item = ([&'a str; 2], f64)>,
{
    for (index, (names, value)) in entries.into_iter().enumerate() {
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(CatalogError::BlankName { section, index });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidValue {
                section,
                index,
                value,
            });
        }
    }
    Ok(())
}

/// Load and validate a JSON catalog file.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use caravan_core::ReferenceData;
/// use caravan_data::load_catalog_json;
///
/// let catalog = load_catalog_json(Utf8Path::new("catalog.json"))?;
/// println!("{} hotels in Fes", catalog.hotels("Fes").len());
/// # Ok::<(), caravan_data::CatalogError>(())
/// ```
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be opened, is not a valid
/// catalog document, or contains blank names or invalid numbers.
pub fn load_catalog_json(path: &Utf8Path) -> Result<ReferenceCatalog, CatalogError> {
    let file = open_utf8_file(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let document: CatalogFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    document.validate()?;
    log::debug!(
        "loaded {} hotels, {} activities and {} distances from {path}",
        document.hotels.len(),
        document.activities.len(),
        document.distances.len()
    );
    Ok(document.into_catalog())
}
