//! Property-based tests for the planner.
//!
//! These tests use `proptest` to assert invariants that must hold for every
//! valid request, complementing the unit tests and behavioural scenarios.
//!
//! # Invariants tested
//!
//! - **Day coverage:** Visit days sum to the trip length.
//! - **Minimum stay:** Every visit lasts at least one day.
//! - **Single visit:** The departure comes first and each city appears once.
//! - **Non-empty activities:** Every visit carries at least one activity.
//! - **Share ranges:** Budget shares lie in `[0.3, 1)`.

use std::collections::HashSet;

use caravan_core::test_support::StubActivityGenerator;
use caravan_core::{ActivityEntry, HotelEntry, PlanError, Planner, ReferenceCatalog};
use caravan_planner::TripPlanner;
use caravan_planner::allocate_days;
use caravan_planner::test_support::{numbered_activity_generator, request_on};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CITIES: [&str; 6] = ["Rabat", "Fes", "Tangier", "Agadir", "Essaouira", "Ouarzazate"];

/// Catalog over `CITIES` with every pair connected and a few hotels each.
fn moroccan_catalog() -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::default();
    for (index, city) in (0_u32..).zip(CITIES) {
        for (rank, price) in [150.0, 300.0, 600.0, 1_200.0].into_iter().enumerate() {
            catalog.push_hotel(HotelEntry::new(city, format!("{city} Hotel {rank}"), price));
        }
        catalog.push_activity(ActivityEntry::new(city, format!("{city} Old Town"), 0.0));
        for (other_index, other) in (0_u32..).zip(CITIES).skip(index as usize + 1) {
            let distance = f64::from(90 + 35 * (index + other_index));
            catalog = catalog.with_distance(city, other, distance);
        }
    }
    catalog
}

fn destinations_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    let candidates: Vec<&'static str> = CITIES.iter().skip(1).copied().collect();
    proptest::sample::subsequence(candidates, 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: allocated days always cover the trip with at least one day
    /// per stop.
    #[test]
    fn allocation_covers_every_day(
        seed in any::<u64>(),
        weights in proptest::collection::vec(0.0_f64..1_000.0, 1..8),
        spare in 0_u32..20,
    ) {
        let stops = u32::try_from(weights.len()).unwrap_or(u32::MAX);
        let total = stops + spare;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let days = allocate_days(&weights, total, &mut rng);

        prop_assert_eq!(days.len(), weights.len());
        prop_assert_eq!(days.iter().sum::<u32>(), total);
        prop_assert!(days.iter().all(|&day| day >= 1));
    }

    /// Property: every offered plan covers the whole trip, visits each city
    /// once starting from the departure and never leaves a visit without
    /// activities.
    #[test]
    fn plans_cover_the_trip(
        seed in any::<u64>(),
        destinations in destinations_strategy(),
        extra_days in 0_u32..6,
        budget in 4_000.0_f64..40_000.0,
    ) {
        let stops = u32::try_from(destinations.len()).unwrap_or(u32::MAX) + 1;
        let days = stops + extra_days;
        let request = request_on("Rabat", &destinations, days, budget).with_seed(seed);
        let planner = TripPlanner::new(moroccan_catalog(), numbered_activity_generator());

        let plans = match planner.generate_plans(&request) {
            Ok(plans) => plans,
            // Small budgets over long trips are legitimately unaffordable.
            Err(PlanError::InfeasibleBudget { .. }) => return Ok(()),
            Err(other) => {
                return Err(TestCaseError::fail(format!("unexpected planning error: {other}")));
            }
        };

        prop_assert_eq!(plans.len(), 3);
        for plan in &plans {
            let itinerary = &plan.itinerary;
            prop_assert_eq!(itinerary.total_days(), days);
            prop_assert!(itinerary.visits.iter().all(|visit| visit.days >= 1));
            prop_assert!(itinerary.visits.iter().all(|visit| !visit.activities.is_empty()));

            let cities: Vec<&str> = itinerary.cities().collect();
            prop_assert_eq!(cities.first().copied(), Some("Rabat"));
            let unique: HashSet<&str> = cities.iter().copied().collect();
            prop_assert_eq!(unique.len(), cities.len());
            prop_assert_eq!(cities.len(), destinations.len() + 1);

            prop_assert!((0.3..1.0).contains(&plan.budget_share));
        }
    }

    /// Property: an unreachable generator never empties a visit.
    #[test]
    fn failing_generation_degrades_gracefully(seed in any::<u64>()) {
        let request = request_on("Rabat", &["Fes", "Agadir"], 5, 30_000.0).with_seed(seed);
        let generator = StubActivityGenerator::failing(caravan_core::GenerationError::EmptyPrompt);
        let planner = TripPlanner::new(moroccan_catalog(), &generator);

        let plans = planner.generate_plans(&request);

        prop_assert!(plans.is_ok());
        for plan in plans.unwrap_or_default() {
            prop_assert!(plan.itinerary.visits.iter().all(|visit| !visit.activities.is_empty()));
        }
    }
}
