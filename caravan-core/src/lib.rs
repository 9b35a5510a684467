//! Core domain types for the Caravan itinerary engine.
//!
//! This crate holds the trip request and itinerary models, the budget tiers,
//! and the collaborator traits the planner consumes: [`ReferenceData`] for
//! hotel, activity and distance lookups, and [`ActivityGenerator`] for the
//! text-generation capability that proposes activities. Constructors and
//! validators return `Result` to surface invalid input early.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod distance;
pub mod generator;
pub mod itinerary;
pub mod planner;
pub mod store;
pub mod tier;
pub mod trip;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(all(docsrs, not(test)), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{ActivityEntry, HotelEntry, ReferenceCatalog, ReferenceData};
pub use distance::{DistanceEntry, DistanceTable};
pub use generator::{ActivityGenerator, GenerationError};
pub use itinerary::{Activity, CityVisit, CostBreakdown, HotelStay, Itinerary, PlanResult};
pub use planner::{PlanError, Planner};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteReferenceStore, SqliteReferenceStoreError};
pub use tier::{BudgetTier, ParseBudgetTierError};
pub use trip::{TripRequest, TripRequestValidationError};
