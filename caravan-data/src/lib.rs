//! Data access adapters for the Caravan itinerary engine.
//!
//! Responsibilities:
//! - Load reference catalogs from JSON files and persist them into the
//!   SQLite layout read by [`caravan_core::SqliteReferenceStore`].
//! - Provide an HTTP [`caravan_core::ActivityGenerator`] backed by an
//!   Ollama-compatible text-generation service.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `caravan-planner`).
//! - Keep blocking I/O off async executors; the HTTP generator bridges to
//!   the synchronous trait explicitly.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

pub mod catalog;
pub mod fs;
pub mod generation;

pub use catalog::{
    CatalogError, CatalogFile, PersistCatalogError, load_catalog_json, persist_catalog_to_sqlite,
};
pub use generation::{
    DEFAULT_USER_AGENT, HttpActivityGenerator, HttpActivityGeneratorConfig, ProviderBuildError,
};
