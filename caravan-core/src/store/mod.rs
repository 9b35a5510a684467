//! Persisted reference data.
//!
//! The SQLite layout below is shared by the read-only
//! [`SqliteReferenceStore`] and the ingestion tooling that writes it. Each
//! store snapshots its rows into a [`crate::ReferenceCatalog`] when opened so
//! a planning run never touches the database.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteReferenceStore, SqliteReferenceStoreError};

/// Statements creating the reference data tables if they are missing.
pub const CATALOG_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS hotels (
    city TEXT NOT NULL,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    category TEXT,
    PRIMARY KEY (city, name)
);
CREATE TABLE IF NOT EXISTS activities (
    city TEXT NOT NULL,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    category TEXT,
    PRIMARY KEY (city, name)
);
CREATE TABLE IF NOT EXISTS distances (
    origin TEXT NOT NULL,
    destination TEXT NOT NULL,
    distance REAL NOT NULL,
    PRIMARY KEY (origin, destination)
);
";
