//! Itineraries: ordered city visits with their hotels, activities and cost
//! breakdown, plus the per-tier plan wrapper returned to callers.

use chrono::NaiveDate;

use crate::BudgetTier;

/// Name of the zero-cost activity substituted when nothing else fits.
pub const PLACEHOLDER_ACTIVITY: &str = "Free City Walk";

/// Name of the synthetic hotel used when a city has no catalog entries.
pub const PLACEHOLDER_HOTEL: &str = "Standard Hotel";

/// An activity chosen for a city visit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activity {
    /// Display name; unique within one itinerary except for the placeholder.
    pub name: String,
    /// Price per person.
    pub price: f64,
}

impl Activity {
    /// Construct an activity.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// The zero-cost [`PLACEHOLDER_ACTIVITY`].
    ///
    /// # Examples
    /// ```
    /// use caravan_core::Activity;
    ///
    /// let walk = Activity::placeholder();
    /// assert!(walk.is_placeholder());
    /// assert_eq!(walk.price, 0.0);
    /// ```
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ACTIVITY, 0.0)
    }

    /// Whether this is the [`PLACEHOLDER_ACTIVITY`].
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_ACTIVITY
    }
}

/// The hotel booked for a city visit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotelStay {
    /// Hotel name.
    pub name: String,
    /// Nightly price.
    pub price_per_night: f64,
    /// `price_per_night × days`.
    pub total_price: f64,
}

impl HotelStay {
    /// Construct a stay of `days` nights.
    ///
    /// # Examples
    /// ```
    /// use caravan_core::HotelStay;
    ///
    /// let stay = HotelStay::new("Riad Fes", 450.0, 3);
    /// assert_eq!(stay.total_price, 1_350.0);
    /// ```
    pub fn new(name: impl Into<String>, price_per_night: f64, days: u32) -> Self {
        Self {
            name: name.into(),
            price_per_night,
            total_price: price_per_night * f64::from(days),
        }
    }
}

/// One stop on the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityVisit {
    /// City name.
    pub city: String,
    /// Days spent in the city, at least one.
    pub days: u32,
    /// First day in the city.
    pub start_date: NaiveDate,
    /// Last day in the city, `start_date + days - 1`.
    pub end_date: NaiveDate,
    /// Accommodation.
    pub hotel: HotelStay,
    /// Selected activities; never empty.
    pub activities: Vec<Activity>,
    /// Cost of the leg arriving in this city; zero for the first stop.
    pub transport_cost: f64,
}

impl CityVisit {
    /// Sum of activity prices.
    pub fn activities_cost(&self) -> f64 {
        self.activities.iter().map(|activity| activity.price).sum()
    }
}

/// Subtotals of an itinerary's spending.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Sum of hotel stay totals.
    pub hotels_total: f64,
    /// Sum of activity prices.
    pub activities_total: f64,
    /// Sum of leg transport costs, untruncated.
    pub transport_total: f64,
}

impl CostBreakdown {
    /// Reported total: hotels plus activities plus the transport total
    /// truncated to a whole amount.
    ///
    /// # Examples
    /// ```
    /// use caravan_core::CostBreakdown;
    ///
    /// let breakdown = CostBreakdown {
    ///     hotels_total: 1_000.0,
    ///     activities_total: 250.0,
    ///     transport_total: 99.9,
    /// };
    /// assert_eq!(breakdown.total(), 1_349.0);
    /// ```
    pub fn total(&self) -> f64 {
        self.hotels_total + self.activities_total + self.transport_total.floor()
    }
}

/// A complete multi-city plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Visits in travel order, departure first.
    pub visits: Vec<CityVisit>,
    /// Spending subtotals.
    pub breakdown: CostBreakdown,
    /// `breakdown.total()`.
    pub total_cost: f64,
}

impl Itinerary {
    /// Construct an itinerary, deriving the total from the breakdown.
    pub fn new(visits: Vec<CityVisit>, breakdown: CostBreakdown) -> Self {
        Self {
            visits,
            total_cost: breakdown.total(),
            breakdown,
        }
    }

    /// Sum of days across visits.
    pub fn total_days(&self) -> u32 {
        self.visits.iter().map(|visit| visit.days).sum()
    }

    /// Visited city names in order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.visits.iter().map(|visit| visit.city.as_str())
    }
}

/// One itinerary offered to the caller, labelled with its tier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    /// Tier the plan was built for.
    pub tier: BudgetTier,
    /// Share of the requested budget allotted to this plan, in `[0, 1)`.
    pub budget_share: f64,
    /// Budget the plan was built against (`requested × budget_share`).
    pub tier_budget: f64,
    /// Percentage of the requested budget the plan actually costs.
    pub budget_used_percent: f64,
    /// The plan itself.
    pub itinerary: Itinerary,
}

impl PlanResult {
    /// Wrap an itinerary built with `budget_share` of `requested_budget`.
    ///
    /// # Examples
    /// ```
    /// use caravan_core::{BudgetTier, CostBreakdown, Itinerary, PlanResult};
    ///
    /// let breakdown = CostBreakdown { hotels_total: 2_500.0, ..CostBreakdown::default() };
    /// let plan = PlanResult::new(
    ///     BudgetTier::Standard,
    ///     0.6,
    ///     10_000.0,
    ///     Itinerary::new(Vec::new(), breakdown),
    /// );
    /// assert_eq!(plan.tier_budget, 6_000.0);
    /// assert_eq!(plan.budget_used_percent, 25.0);
    /// ```
    pub fn new(
        tier: BudgetTier,
        budget_share: f64,
        requested_budget: f64,
        itinerary: Itinerary,
    ) -> Self {
        let budget_used_percent = if requested_budget > 0.0 {
            itinerary.total_cost / requested_budget * 100.0
        } else {
            0.0
        };
        Self {
            tier,
            budget_share,
            tier_budget: requested_budget * budget_share,
            budget_used_percent,
            itinerary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn visit(city: &str, days: u32, nightly: f64, activities: &[(&str, f64)]) -> CityVisit {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid calendar date");
        CityVisit {
            city: city.to_owned(),
            days,
            start_date: start,
            end_date: start,
            hotel: HotelStay::new("Hotel", nightly, days),
            activities: activities
                .iter()
                .map(|(name, price)| Activity::new(*name, *price))
                .collect(),
            transport_cost: 0.0,
        }
    }

    #[rstest]
    fn itinerary_sums_days_and_lists_cities() {
        let itinerary = Itinerary::new(
            vec![visit("A", 2, 100.0, &[]), visit("B", 3, 200.0, &[])],
            CostBreakdown::default(),
        );
        assert_eq!(itinerary.total_days(), 5);
        assert_eq!(itinerary.cities().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[rstest]
    fn visit_sums_activity_prices() {
        let stop = visit("A", 1, 100.0, &[("Museum", 80.0), ("Hammam", 150.0)]);
        assert!((stop.activities_cost() - 230.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(10.99, 10.0)]
    fn transport_is_truncated_in_total(#[case] transport: f64, #[case] expected: f64) {
        let breakdown = CostBreakdown {
            transport_total: transport,
            ..CostBreakdown::default()
        };
        assert!((breakdown.total() - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn placeholder_is_recognised() {
        assert!(Activity::placeholder().is_placeholder());
        assert!(!Activity::new("Museum", 0.0).is_placeholder());
    }
}
