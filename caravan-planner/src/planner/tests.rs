//! Tests for the `TripPlanner`.

use super::*;
use caravan_core::test_support::{CountingReferenceData, StubActivityGenerator, triangle_catalog};
use caravan_core::{BudgetTier, TripRequestValidationError};
use rstest::rstest;

use crate::test_support::{numbered_activity_generator, request_on};

fn planner() -> TripPlanner<caravan_core::ReferenceCatalog, StubActivityGenerator> {
    TripPlanner::new(triangle_catalog(), numbered_activity_generator())
}

#[rstest]
fn generous_budget_offers_every_tier() {
    let plans = planner()
        .generate_plans(&request_on("A", &["B", "C"], 7, 20_000.0))
        .expect("plans");

    let tiers: Vec<BudgetTier> = plans.iter().map(|plan| plan.tier).collect();
    assert_eq!(
        tiers,
        vec![BudgetTier::Premium, BudgetTier::Standard, BudgetTier::Economy]
    );
    for plan in &plans {
        assert_eq!(plan.itinerary.total_days(), 7);
        assert_eq!(
            plan.itinerary.cities().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert!(plan.budget_share > 0.0 && plan.budget_share < 1.0);
    }
}

#[rstest]
fn modest_budget_offers_only_economy_plans() {
    let plans = planner()
        .generate_plans(&request_on("A", &["B", "C"], 7, 1_800.0))
        .expect("plans");

    assert_eq!(plans.len(), 3);
    assert!(plans.iter().all(|plan| plan.tier == BudgetTier::Economy));
    let shares: Vec<f64> = plans.iter().map(|plan| plan.budget_share).collect();
    assert!(shares.windows(2).all(|pair| pair.first() > pair.get(1)));
}

#[rstest]
fn tiny_budget_is_infeasible() {
    let err = planner()
        .generate_plans(&request_on("A", &["B", "C"], 7, 500.0))
        .expect_err("budget too small");

    match err {
        PlanError::InfeasibleBudget {
            budget,
            economy_cost,
        } => {
            assert!((budget - 500.0).abs() < f64::EPSILON);
            assert!(economy_cost > budget);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn invalid_requests_never_reach_collaborators() {
    let data = CountingReferenceData::new(triangle_catalog());
    let generator = StubActivityGenerator::with_responses(["Tour - 10"]);
    let planner = TripPlanner::new(&data, &generator);
    let request = request_on("A", &["B", "C", "D"], 3, 2_000.0);

    let err = planner.generate_plans(&request).expect_err("too many cities");

    assert_eq!(
        err,
        PlanError::InvalidRequest(TripRequestValidationError::TooManyCities { cities: 4, days: 3 })
    );
    assert_eq!(data.total_calls(), 0);
    assert_eq!(generator.calls(), 0);
}

#[rstest]
fn seeded_requests_are_reproducible() {
    let request = request_on("A", &["C", "B"], 9, 8_000.0);
    let first = planner().generate_plans(&request).expect("plans");
    let second = planner().generate_plans(&request).expect("plans");
    assert_eq!(first, second);
}

#[rstest]
fn preferred_start_leads_the_route() {
    let request = request_on("A", &["B", "C"], 7, 20_000.0).with_preferred_start("C");
    let plans = planner().generate_plans(&request).expect("plans");
    for plan in plans {
        assert_eq!(
            plan.itinerary.cities().collect::<Vec<_>>(),
            vec!["A", "C", "B"]
        );
    }
}

#[rstest]
fn probe_reports_every_tier() {
    let report = planner()
        .probe(&request_on("A", &["B", "C"], 7, 20_000.0))
        .expect("probe");

    let tiers: Vec<BudgetTier> = report.probes.iter().map(|probe| probe.tier).collect();
    assert_eq!(tiers, BudgetTier::ALL.to_vec());
    assert!(report.probes.iter().all(|probe| probe.feasible));
    assert_eq!(report.best_feasible(), Some(BudgetTier::Premium));
}

#[rstest]
fn plans_survive_a_failing_generator() {
    let planner = TripPlanner::new(
        triangle_catalog(),
        StubActivityGenerator::failing(caravan_core::GenerationError::Network {
            url: "http://localhost:11434/api/generate".to_owned(),
            message: "connection refused".to_owned(),
        }),
    );
    let plans = planner
        .generate_plans(&request_on("A", &["B", "C"], 7, 20_000.0))
        .expect("plans");

    for plan in plans {
        for visit in &plan.itinerary.visits {
            assert!(!visit.activities.is_empty());
        }
    }
}
