//! Shared test harness modules for the Caravan CLI.

use super::*;
use crate::ingest::{IngestConfig, execute_ingest};
use crate::plan::{
    PlanConfig, PlannerBuilder, TripPlanning, config_from_layers_for_test, load_reference_catalog,
    load_trip_request, run_plan_with,
};

mod helpers;
mod ingest_unit;
