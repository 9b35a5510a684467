//! SQLite-backed reference store.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::{
    ActivityEntry, DistanceEntry, HotelEntry, ReferenceCatalog, ReferenceData,
};

/// Error raised when reading persisted reference data.
#[derive(Debug, Error)]
pub enum SqliteReferenceStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading rows from one of the catalog tables failed.
    #[error("failed to read {table} rows: {source}")]
    ReadTable {
        /// Table being read.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored price or distance was negative or not finite.
    #[error("{table} row {key:?} has invalid value {value}")]
    InvalidValue {
        /// Table holding the row.
        table: &'static str,
        /// Human-readable row key.
        key: String,
        /// Offending value.
        value: f64,
    },
}

/// Read-only reference data loaded from SQLite into memory.
pub struct SqliteReferenceStore {
    catalog: ReferenceCatalog,
}

impl fmt::Debug for SqliteReferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteReferenceStore")
            .field("hotels", &self.catalog.all_hotels().len())
            .field("activities", &self.catalog.all_activities().len())
            .field("distances", &self.catalog.distances().len())
            .finish_non_exhaustive()
    }
}

impl SqliteReferenceStore {
    /// Open the database read-only and snapshot every catalog table.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteReferenceStoreError`] when the file cannot be opened,
    /// a table is missing, or a row holds an invalid number.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteReferenceStoreError>
    where
        P: AsRef<Path>,
    {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteReferenceStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;

        let hotels = load_rows(
            &connection,
            "hotels",
            "SELECT city, name, price, category FROM hotels ORDER BY city, price, name",
            |row| {
                Ok(HotelEntry {
                    city: row.get(0)?,
                    name: row.get(1)?,
                    price: row.get(2)?,
                    category: row.get(3)?,
                })
            },
        )?;
        let activities = load_rows(
            &connection,
            "activities",
            "SELECT city, name, price, category FROM activities ORDER BY city, price, name",
            |row| {
                Ok(ActivityEntry {
                    city: row.get(0)?,
                    name: row.get(1)?,
                    price: row.get(2)?,
                    category: row.get(3)?,
                })
            },
        )?;
        let distances = load_rows(
            &connection,
            "distances",
            "SELECT origin, destination, distance FROM distances",
            |row| {
                let origin: String = row.get(0)?;
                let destination: String = row.get(1)?;
                Ok(DistanceEntry::new(origin, destination, row.get(2)?))
            },
        )?;

        ensure_valid(
            "hotels",
            hotels.iter().map(|h| (format!("{}/{}", h.city, h.name), h.price)),
        )?;
        ensure_valid(
            "activities",
            activities.iter().map(|a| (format!("{}/{}", a.city, a.name), a.price)),
        )?;
        ensure_valid(
            "distances",
            distances.iter().map(|d| (format!("{}->{}", d.from, d.to), d.distance)),
        )?;

        log::debug!(
            "loaded {} hotels, {} activities and {} distances from {}",
            hotels.len(),
            activities.len(),
            distances.len(),
            database_path.display()
        );

        Ok(Self {
            catalog: ReferenceCatalog::new(hotels, activities, distances),
        })
    }

    /// The in-memory snapshot.
    pub const fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Consume the store, returning its snapshot.
    pub fn into_catalog(self) -> ReferenceCatalog {
        self.catalog
    }
}

impl ReferenceData for SqliteReferenceStore {
    fn hotels(&self, city: &str) -> Vec<HotelEntry> {
        self.catalog.hotels(city)
    }

    fn activities(&self, city: &str) -> Vec<ActivityEntry> {
        self.catalog.activities(city)
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.catalog.distance(from, to)
    }
}

fn load_rows<T, F>(
    connection: &Connection,
    table: &'static str,
    query: &str,
    map: F,
) -> Result<Vec<T>, SqliteReferenceStoreError>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let read_error = |source| SqliteReferenceStoreError::ReadTable { table, source };
    let mut statement = connection.prepare(query).map_err(read_error)?;
    let rows = statement.query_map([], map).map_err(read_error)?;
    rows.collect::<rusqlite::Result<Vec<T>>>().map_err(read_error)
}

fn ensure_valid<I>(table: &'static str, values: I) -> Result<(), SqliteReferenceStoreError>
where
    I: IntoIterator<Item = (String, f64)>,
{
    for (key, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(SqliteReferenceStoreError::InvalidValue { table, key, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CATALOG_SCHEMA;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn seed(path: &Path, statements: &str) {
        let connection = Connection::open(path).expect("open db");
        connection
            .execute_batch(CATALOG_SCHEMA)
            .expect("create schema");
        connection.execute_batch(statements).expect("seed rows");
    }

    #[rstest]
    fn loads_catalog_rows(workspace: TempDir) {
        let path = workspace.path().join("catalog.db");
        seed(
            &path,
            "INSERT INTO hotels VALUES ('Fes', 'Riad Fes', 900.0, 'riad');
             INSERT INTO hotels VALUES ('Fes', 'Dar Seffarine', 450.0, NULL);
             INSERT INTO activities VALUES ('Fes', 'Tanneries', 50.0, 'tour');
             INSERT INTO distances VALUES ('Rabat', 'Fes', 210.0);",
        );

        let store = SqliteReferenceStore::open(&path).expect("open store");
        let hotels = store.hotels("Fes");
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name, "Dar Seffarine");
        assert_eq!(hotels[1].category.as_deref(), Some("riad"));
        assert_eq!(store.activities("Fes").len(), 1);
        assert_eq!(store.distance("Fes", "Rabat"), Some(210.0));
    }

    #[rstest]
    fn rejects_negative_prices(workspace: TempDir) {
        let path = workspace.path().join("catalog.db");
        seed(&path, "INSERT INTO hotels VALUES ('Fes', 'Broken', -1.0, NULL);");

        let err = SqliteReferenceStore::open(&path).expect_err("negative price");
        assert!(matches!(
            err,
            SqliteReferenceStoreError::InvalidValue { table: "hotels", .. }
        ));
    }

    #[rstest]
    fn reports_missing_tables(workspace: TempDir) {
        let path = workspace.path().join("empty.db");
        Connection::open(&path).expect("create empty db");

        let err = SqliteReferenceStore::open(&path).expect_err("missing tables");
        assert!(matches!(
            err,
            SqliteReferenceStoreError::ReadTable { table: "hotels", .. }
        ));
    }

    #[rstest]
    fn reports_unopenable_database(workspace: TempDir) {
        let path = workspace.path().join("missing").join("catalog.db");
        let err = SqliteReferenceStore::open(&path).expect_err("missing file");
        assert!(matches!(err, SqliteReferenceStoreError::OpenDatabase { .. }));
    }
}
