//! Facade crate for the Caravan trip planning engine.
//!
//! This crate re-exports the core domain types and exposes the planner and
//! the SQLite reference store behind feature flags.

#![forbid(unsafe_code)]

pub use caravan_core::{
    Activity, ActivityEntry, ActivityGenerator, BudgetTier, CityVisit, CostBreakdown,
    DistanceEntry, DistanceTable, GenerationError, HotelEntry, HotelStay, Itinerary, PlanError,
    PlanResult, Planner, ReferenceCatalog, ReferenceData, TripRequest,
    TripRequestValidationError,
};

#[cfg(feature = "store-sqlite")]
pub use caravan_core::{SqliteReferenceStore, SqliteReferenceStoreError};

#[cfg(feature = "planner")]
pub use caravan_planner::{ProbeReport, TierProbe, TripPlanner, TripPlannerConfig};
