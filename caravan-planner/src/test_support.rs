//! Test-only utilities for `caravan-planner`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use std::sync::atomic::{AtomicUsize, Ordering};

use caravan_core::TripRequest;
use caravan_core::test_support::StubActivityGenerator;
use chrono::{Days, NaiveDate};

/// First day of every trip built by [`request_on`].
///
/// # Panics
///
/// Never in practice; the date is a fixed valid calendar day.
#[must_use]
#[expect(clippy::expect_used, reason = "fixed calendar date used only in tests")]
pub fn trip_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 10).expect("valid calendar date")
}

/// A request departing from `departure` for `days` days from
/// [`trip_start`], seeded for reproducibility.
///
/// # Examples
/// ```rust
/// use caravan_planner::test_support::request_on;
///
/// let request = request_on("A", &["B", "C"], 7, 5_000.0);
/// assert_eq!(request.total_days(), 7);
/// assert_eq!(request.seed, Some(42));
/// ```
#[must_use]
pub fn request_on(departure: &str, destinations: &[&str], days: u32, budget: f64) -> TripRequest {
    let start = trip_start();
    let end = start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(start);
    TripRequest::new(
        departure,
        destinations.iter().copied(),
        start,
        end,
        budget,
    )
    .with_seed(42)
}

/// Generator answering every call with five fresh, uniquely named
/// activities priced 20 to 80.
///
/// Names never repeat across calls, so itineraries built with it always
/// get real activities when the budget allows.
#[must_use]
pub fn numbered_activity_generator() -> StubActivityGenerator {
    let batches = AtomicUsize::new(0);
    StubActivityGenerator::from_fn(move |_| {
        let batch = batches.fetch_add(1, Ordering::SeqCst);
        let lines: Vec<String> = (0..5_u32)
            .map(|item| format!("Sight {batch}-{item} - {}", 20 + item * 15))
            .collect();
        Ok(lines.join("\n"))
    })
}
