use thiserror::Error;

use crate::{PlanResult, TripRequest, TripRequestValidationError};

/// Errors returned by [`Planner::generate_plans`].
///
/// These are the only failures a caller sees. Missing catalog data and
/// generation failures are compensated inside the planner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request was rejected before any planning work.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] TripRequestValidationError),
    /// Even the cheapest probe itinerary costs more than the budget.
    #[error(
        "budget {budget} is too small for this trip; the cheapest plan costs about {economy_cost}"
    )]
    InfeasibleBudget {
        /// Budget supplied by the caller.
        budget: f64,
        /// Total cost of the economy probe itinerary.
        economy_cost: f64,
    },
}

/// Alias for the planner error type.
pub type Error = PlanError;

/// Produce tiered itineraries for a trip request.
///
/// Implementations must validate the request before consulting any
/// collaborator and return [`PlanError::InvalidRequest`] rather than
/// panicking. Planners must be `Send + Sync` to operate safely across
/// threads.
pub trait Planner: Send + Sync {
    /// Plan a request, producing one result per offered tier.
    fn generate_plans(&self, request: &TripRequest) -> Result<Vec<PlanResult>, Error>;
}
