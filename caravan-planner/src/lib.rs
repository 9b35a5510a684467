//! Tiered multi-city itinerary planner for Caravan.
//!
//! This crate provides [`TripPlanner`], the default implementation of the
//! [`Planner`](caravan_core::Planner) trait. A request is validated, then
//! the route is ordered with a nearest-neighbour walk, days are shared out
//! in proportion to the legs, and each stop gets a hotel from the tier's
//! price band plus activities proposed by an
//! [`ActivityGenerator`](caravan_core::ActivityGenerator). Probe
//! itineraries at fixed budget shares decide which tiers are affordable and
//! three plans are then built from the matching share bands.
//!
//! Gaps in the reference data never fail a plan. Missing distances, hotels
//! and activities are replaced through [`resolve_or_default`] and the
//! placeholder hotel and activity.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod activities;
mod assembler;
mod context;
mod cost;
mod days;
mod fallback;
mod planner;
mod route;
mod tiers;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(all(docsrs, not(test)), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use activities::{
    ActivityBudget, ActivitySelector, GENEROUS_DAILY_BUDGET, UsedActivities, activity_prompt,
    desired_activity_count, parse_activities,
};
pub use assembler::ItineraryAssembler;
pub use context::PlanningContext;
pub use cost::{
    HotelChoice, TRANSPORT_RATE, UNKNOWN_LEG_COST, budget_scale, percentile_window, select_hotel,
    transport_cost,
};
pub use days::{allocate_days, leg_weights};
pub use fallback::{Fallback, resolve_or_default};
pub use planner::{TripPlanner, TripPlannerConfig};
pub use route::optimise_route;
pub use tiers::{ProbeReport, ShareBand, TierProbe, TierResolver};
