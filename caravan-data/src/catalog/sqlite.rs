//! SQLite persistence for reference catalogs.

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::ReferenceCatalog;
use caravan_core::store::CATALOG_SCHEMA;
use rusqlite::{Connection, Error as SqliteError, Transaction};
use thiserror::Error;

use crate::fs::ensure_parent_dir;

/// Errors raised when persisting a catalog to SQLite.
#[derive(Debug, Error)]
pub enum PersistCatalogError {
    /// Failed to create the parent directory for the database.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin catalog persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the catalog tables failed.
    #[error("failed to create catalog tables")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing an insert statement failed.
    #[error("failed to prepare insert into {table}")]
    PrepareInsert {
        /// Table being written.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a row failed.
    #[error("failed to persist {table} row {key:?}")]
    PersistRow {
        /// Table being written.
        table: &'static str,
        /// Human-readable row key.
        key: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit catalog persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist a reference catalog to a SQLite database on disk.
///
/// The function is idempotent: rows are replaced when their keys already
/// exist. Parent directories are created automatically and the catalog
/// tables are initialised if missing. Everything is written inside one
/// transaction, so a failure leaves the database unchanged.
///
/// # Errors
///
/// Returns [`PersistCatalogError`] when the directory or database cannot be
/// created or a row fails to write.
pub fn persist_catalog_to_sqlite(
    path: &Utf8Path,
    catalog: &ReferenceCatalog,
) -> Result<(), PersistCatalogError> {
    ensure_parent_dir(path).map_err(|source| PersistCatalogError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistCatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistCatalogError::BeginTransaction { source })?;

    transaction
        .execute_batch(CATALOG_SCHEMA)
        .map_err(|source| PersistCatalogError::CreateSchema { source })?;
    persist_rows(&transaction, catalog)?;

    transaction
        .commit()
        .map_err(|source| PersistCatalogError::Commit { source })?;
    log::info!("persisted catalog to {path}");
    Ok(())
}

fn persist_rows(
    transaction: &Transaction<'_>,
    catalog: &ReferenceCatalog,
) -> Result<(), PersistCatalogError> {
    let mut hotels = prepare(
        transaction,
        "hotels",
        "INSERT OR REPLACE INTO hotels (city, name, price, category) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for hotel in catalog.all_hotels() {
        hotels
            .execute((&hotel.city, &hotel.name, hotel.price, &hotel.category))
            .map_err(|source| PersistCatalogError::PersistRow {
                table: "hotels",
                key: format!("{}/{}", hotel.city, hotel.name),
                source,
            })?;
    }

    let mut activities = prepare(
        transaction,
        "activities",
        "INSERT OR REPLACE INTO activities (city, name, price, category) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for activity in catalog.all_activities() {
        activities
            .execute((
                &activity.city,
                &activity.name,
                activity.price,
                &activity.category,
            ))
            .map_err(|source| PersistCatalogError::PersistRow {
                table: "activities",
                key: format!("{}/{}", activity.city, activity.name),
                source,
            })?;
    }

    let mut distances = prepare(
        transaction,
        "distances",
        "INSERT OR REPLACE INTO distances (origin, destination, distance) VALUES (?1, ?2, ?3)",
    )?;
    for entry in catalog.distances().entries() {
        distances
            .execute((&entry.from, &entry.to, entry.distance))
            .map_err(|source| PersistCatalogError::PersistRow {
                table: "distances",
                key: format!("{}->{}", entry.from, entry.to),
                source,
            })?;
    }

    Ok(())
}

fn prepare<'conn>(
    transaction: &'conn Transaction<'_>,
    table: &'static str,
    sql: &str,
) -> Result<rusqlite::Statement<'conn>, PersistCatalogError> {
    transaction
        .prepare(sql)
        .map_err(|source| PersistCatalogError::PrepareInsert { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravan_core::{ActivityEntry, HotelEntry, ReferenceData, SqliteReferenceStore};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::default()
            .with_hotel(HotelEntry::new("Fes", "Riad Fes", 900.0))
            .with_hotel(HotelEntry::new("Rabat", "Hotel Rabat", 500.0))
            .with_activity(ActivityEntry::new("Fes", "Tanneries", 50.0))
            .with_distance("Rabat", "Fes", 210.0)
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn db_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 path")
    }

    #[rstest]
    fn persists_every_table(temp_dir: TempDir, catalog: ReferenceCatalog) {
        let path = db_path(&temp_dir, "catalog.db");

        persist_catalog_to_sqlite(&path, &catalog).expect("persist catalog");

        let conn = Connection::open(path.as_std_path()).expect("open database");
        for (table, expected) in [("hotels", 2), ("activities", 1), ("distances", 1)] {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .expect("count rows");
            assert_eq!(count, expected, "unexpected row count in {table}");
        }
    }

    #[rstest]
    fn store_reads_back_what_was_written(temp_dir: TempDir, catalog: ReferenceCatalog) {
        let path = db_path(&temp_dir, "catalog.db");
        persist_catalog_to_sqlite(&path, &catalog).expect("persist catalog");

        let store = SqliteReferenceStore::open(path.as_std_path()).expect("open store");

        assert_eq!(store.hotels("Fes"), catalog.hotels("Fes"));
        assert_eq!(store.activities("Fes"), catalog.activities("Fes"));
        assert_eq!(store.distance("Fes", "Rabat"), Some(210.0));
    }

    #[rstest]
    fn persisting_twice_replaces_rows(temp_dir: TempDir, catalog: ReferenceCatalog) {
        let path = db_path(&temp_dir, "catalog.db");
        persist_catalog_to_sqlite(&path, &catalog).expect("first write");

        let repriced = catalog.with_hotel(HotelEntry::new("Fes", "Riad Fes", 750.0));
        persist_catalog_to_sqlite(&path, &repriced).expect("second write");

        let conn = Connection::open(path.as_std_path()).expect("open database");
        let price: f64 = conn
            .query_row(
                "SELECT price FROM hotels WHERE city = 'Fes' AND name = 'Riad Fes'",
                [],
                |row| row.get(0),
            )
            .expect("read price");
        assert!((price - 750.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn creates_parent_directory(temp_dir: TempDir, catalog: ReferenceCatalog) {
        let nested = db_path(&temp_dir, "nested/deeper/catalog.db");

        persist_catalog_to_sqlite(&nested, &catalog).expect("persist into nested path");

        assert!(nested.exists(), "database should be created at nested path");
    }
}
