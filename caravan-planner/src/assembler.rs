//! Building one itinerary against one tier budget.
//!
//! The assembler orders the route, splits the days, then walks the stops
//! in order. Each stop pays for its arrival leg and its hotel before its
//! activities are chosen from whatever budget is left, so earlier stops get
//! first claim on the money. Breakdown subtotals are accumulated as the walk
//! proceeds and the total is derived once at the end.

use caravan_core::{
    ActivityGenerator, BudgetTier, CityVisit, CostBreakdown, HotelStay, Itinerary, ReferenceData,
};
use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::TripPlannerConfig;
use crate::activities::{ActivityBudget, ActivitySelector, UsedActivities};
use crate::context::PlanningContext;
use crate::cost::{select_hotel, transport_cost};
use crate::days::{allocate_days, leg_weights};
use crate::route::optimise_route;

/// Builds itineraries from reference data and generated activities.
pub struct ItineraryAssembler<'a, D: ?Sized, G: ?Sized> {
    data: &'a D,
    generator: &'a G,
    config: &'a TripPlannerConfig,
}

/// Running state of one build.
struct Walk {
    visits: Vec<CityVisit>,
    breakdown: CostBreakdown,
    used: UsedActivities,
    next_date: NaiveDate,
    previous: Option<String>,
}

impl Walk {
    #[expect(
        clippy::float_arithmetic,
        reason = "spending is accumulated in floating point"
    )]
    fn spent(&self) -> f64 {
        self.breakdown.hotels_total
            + self.breakdown.activities_total
            + self.breakdown.transport_total
    }
}

impl<'a, D, G> ItineraryAssembler<'a, D, G>
where
    D: ReferenceData + ?Sized,
    G: ActivityGenerator + ?Sized,
{
    /// Assembler over the given collaborators.
    pub const fn new(data: &'a D, generator: &'a G, config: &'a TripPlannerConfig) -> Self {
        Self {
            data,
            generator,
            config,
        }
    }

    /// Build an itinerary for `tier` spending at most `tier_budget` on
    /// activities.
    ///
    /// Hotels and transport are committed regardless of the budget, so the
    /// result may cost more than `tier_budget`; the tier resolver uses that
    /// overshoot to judge feasibility.
    pub fn build<R>(
        &self,
        context: &PlanningContext,
        tier: BudgetTier,
        tier_budget: f64,
        rng: &mut R,
    ) -> Itinerary
    where
        R: Rng + ?Sized,
    {
        let route = self.route(context, rng);
        let weights = leg_weights(&route, self.data, self.config.placeholder_leg_distance, rng);
        let days = allocate_days(&weights, context.total_days, rng);
        let tier_daily = daily_share(tier_budget, context.total_days);
        log::debug!("{tier} route {route:?} with days {days:?}");

        let selector =
            ActivitySelector::new(self.data, self.generator, self.config.catalog_fallback);
        let mut walk = Walk {
            visits: Vec::with_capacity(route.len()),
            breakdown: CostBreakdown::default(),
            used: UsedActivities::new(),
            next_date: context.start_date,
            previous: None,
        };
        for (city, stay) in route.into_iter().zip(days) {
            self.visit(
                &mut walk,
                &selector,
                VisitPlan {
                    city,
                    days: stay,
                    tier,
                    tier_budget,
                    tier_daily,
                    requested_budget: context.requested_budget,
                },
                rng,
            );
        }
        Itinerary::new(walk.visits, walk.breakdown)
    }

    fn route<R>(&self, context: &PlanningContext, rng: &mut R) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        let mut route = optimise_route(
            &context.departure,
            &context.destinations,
            context.preferred_start.as_deref(),
            self.data,
            rng,
        );
        if !route.contains(&context.departure) {
            route.insert(0, context.departure.clone());
        }
        route
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "costs and budgets are floating-point amounts"
    )]
    fn visit<R>(
        &self,
        walk: &mut Walk,
        selector: &ActivitySelector<'_, D, G>,
        plan: VisitPlan,
        rng: &mut R,
    ) where
        R: Rng + ?Sized,
    {
        let VisitPlan {
            city,
            days,
            tier,
            tier_budget,
            tier_daily,
            requested_budget,
        } = plan;

        let transport = walk.previous.as_deref().map_or(0.0, |from| {
            transport_cost(from, &city, requested_budget, self.data, rng)
        });
        walk.breakdown.transport_total += transport;

        let choice = select_hotel(&city, &self.data.hotels(&city), tier, rng);
        let hotel = HotelStay::new(choice.name, choice.price_per_night, days);
        walk.breakdown.hotels_total += hotel.total_price;

        let budget = ActivityBudget {
            tier_daily,
            remaining: tier_budget - walk.spent(),
        };
        let activities = selector.select(&city, budget, &mut walk.used, rng);
        walk.breakdown.activities_total += activities.iter().map(|a| a.price).sum::<f64>();

        let start_date = walk.next_date;
        let end_date = offset(start_date, days.saturating_sub(1));
        walk.next_date = offset(start_date, days);
        walk.previous = Some(city.clone());
        walk.visits.push(CityVisit {
            city,
            days,
            start_date,
            end_date,
            hotel,
            activities,
            transport_cost: transport,
        });
    }
}

struct VisitPlan {
    city: String,
    days: u32,
    tier: BudgetTier,
    tier_budget: f64,
    tier_daily: f64,
    requested_budget: f64,
}

fn offset(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days))).unwrap_or(date)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the daily share is a floating-point fraction of the budget"
)]
fn daily_share(tier_budget: f64, total_days: u32) -> f64 {
    if total_days == 0 {
        tier_budget
    } else {
        tier_budget / f64::from(total_days)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests {
    use super::*;
    use caravan_core::TripRequest;
    use caravan_core::itinerary::PLACEHOLDER_HOTEL;
    use caravan_core::test_support::{StubActivityGenerator, triangle_catalog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    use crate::test_support::{numbered_activity_generator, request_on, trip_start};

    #[fixture]
    fn context() -> PlanningContext {
        PlanningContext::from_request(&request_on("A", &["B", "C"], 7, 20_000.0))
            .expect("valid request")
    }

    #[rstest]
    fn visits_every_city_once_starting_at_departure(context: PlanningContext) {
        let catalog = triangle_catalog();
        let generator = numbered_activity_generator();
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let itinerary = assembler.build(&context, BudgetTier::Standard, 10_000.0, &mut rng);

        assert_eq!(itinerary.cities().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(itinerary.total_days(), 7);
        assert!(itinerary.visits.iter().all(|visit| visit.days >= 1));
    }

    #[rstest]
    fn dates_are_contiguous(context: PlanningContext) {
        let catalog = triangle_catalog();
        let generator = numbered_activity_generator();
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let itinerary = assembler.build(&context, BudgetTier::Economy, 6_000.0, &mut rng);

        let mut expected_start = context.start_date;
        for visit in &itinerary.visits {
            assert_eq!(visit.start_date, expected_start);
            assert_eq!(
                visit.end_date,
                offset(visit.start_date, visit.days - 1),
                "{} ends on the wrong day",
                visit.city
            );
            expected_start = offset(visit.end_date, 1);
        }
    }

    #[rstest]
    fn transport_follows_the_route(context: PlanningContext) {
        let catalog = triangle_catalog();
        let generator = numbered_activity_generator();
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let itinerary = assembler.build(&context, BudgetTier::Premium, 16_000.0, &mut rng);

        let legs: Vec<f64> = itinerary
            .visits
            .iter()
            .map(|visit| visit.transport_cost)
            .collect();
        assert_eq!(legs, vec![0.0, 240.0, 360.0]);
        assert!((itinerary.breakdown.transport_total - 600.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn totals_match_the_visits(context: PlanningContext) {
        let catalog = triangle_catalog();
        let generator = numbered_activity_generator();
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let itinerary = assembler.build(&context, BudgetTier::Standard, 10_000.0, &mut rng);

        let hotels: f64 = itinerary
            .visits
            .iter()
            .map(|visit| visit.hotel.total_price)
            .sum();
        let activities: f64 = itinerary.visits.iter().map(CityVisit::activities_cost).sum();
        assert!((itinerary.breakdown.hotels_total - hotels).abs() < 1e-6);
        assert!((itinerary.breakdown.activities_total - activities).abs() < 1e-6);
        assert!((itinerary.total_cost - itinerary.breakdown.total()).abs() < f64::EPSILON);
    }

    #[rstest]
    fn activity_names_are_unique_within_an_itinerary(context: PlanningContext) {
        let catalog = triangle_catalog();
        let generator = StubActivityGenerator::from_fn(|_| {
            Ok("Old Town - 10\nHarbour - 20\nMuseum - 30\nGardens - 40\nMarket - 50".to_owned())
        });
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let itinerary = assembler.build(&context, BudgetTier::Premium, 16_000.0, &mut rng);

        let mut names: Vec<&str> = itinerary
            .visits
            .iter()
            .flat_map(|visit| visit.activities.iter())
            .filter(|activity| !activity.is_placeholder())
            .map(|activity| activity.name.as_str())
            .collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[rstest]
    fn unknown_cities_use_placeholders() {
        let start = trip_start();
        let request = TripRequest::new("Atlantis", ["Lemuria"], start, offset(start, 3), 800.0);
        let context = PlanningContext::from_request(&request).expect("valid request");
        let catalog = caravan_core::ReferenceCatalog::default();
        let generator = StubActivityGenerator::with_responses(Vec::<String>::new());
        let config = TripPlannerConfig::default();
        let assembler = ItineraryAssembler::new(&catalog, &generator, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let itinerary = assembler.build(&context, BudgetTier::Economy, 240.0, &mut rng);

        assert_eq!(itinerary.total_days(), 3);
        for visit in &itinerary.visits {
            assert_eq!(visit.hotel.name, PLACEHOLDER_HOTEL);
            assert_eq!(visit.activities.len(), 1);
            assert!(visit.activities.iter().all(|activity| activity.is_placeholder()));
        }
        let lemuria = itinerary.visits.get(1).expect("second stop");
        assert!((32.0..48.0).contains(&lemuria.transport_cost));
    }
}
