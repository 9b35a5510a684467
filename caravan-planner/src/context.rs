use caravan_core::{PlanError, TripRequest};
use chrono::NaiveDate;

/// A validated request in the shape the planning stages consume.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningContext {
    /// City the trip starts from; always the first stop.
    pub departure: String,
    /// Destinations with duplicates and the departure removed.
    pub destinations: Vec<String>,
    /// Destination to visit first after the departure, if any.
    pub preferred_start: Option<String>,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Days to distribute across the route.
    pub total_days: u32,
    /// Budget supplied by the caller.
    pub requested_budget: f64,
}

impl PlanningContext {
    /// Validate `request` and derive the context.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRequest`] when the request fails
    /// validation.
    pub fn from_request(request: &TripRequest) -> Result<Self, PlanError> {
        request.validate()?;
        Ok(Self {
            departure: request.departure.clone(),
            destinations: request.distinct_destinations(),
            preferred_start: request.preferred_start.clone(),
            start_date: request.start_date,
            total_days: u32::try_from(request.total_days()).unwrap_or(u32::MAX),
            requested_budget: request.budget,
        })
    }

    /// Budget for the share `share` of the caller's budget.
    #[expect(
        clippy::float_arithmetic,
        reason = "tier budgets are fractions of the requested amount"
    )]
    #[must_use]
    pub fn budget_for(&self, share: f64) -> f64 {
        self.requested_budget * share
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests {
    use super::*;
    use caravan_core::TripRequestValidationError;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).expect("valid calendar date")
    }

    #[rstest]
    fn derives_days_and_distinct_destinations() {
        let request = TripRequest::new("A", ["B", "C", "B"], day(10), day(17), 2_000.0)
            .with_preferred_start("C");
        let context = PlanningContext::from_request(&request).expect("valid request");
        assert_eq!(context.total_days, 7);
        assert_eq!(context.destinations, vec!["B".to_owned(), "C".to_owned()]);
        assert_eq!(context.preferred_start.as_deref(), Some("C"));
        assert!((context.budget_for(0.5) - 1_000.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn rejects_invalid_requests() {
        let request = TripRequest::new("A", ["B"], day(17), day(10), 2_000.0);
        let err = PlanningContext::from_request(&request).expect_err("reversed dates");
        assert!(matches!(
            err,
            PlanError::InvalidRequest(TripRequestValidationError::EndNotAfterStart { .. })
        ));
    }
}
