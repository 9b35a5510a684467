//! Hotel choice and transport pricing.

use std::ops::Range;

use caravan_core::{BudgetTier, HotelEntry, ReferenceData};
use caravan_core::itinerary::PLACEHOLDER_HOTEL;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::fallback::{Fallback, resolve_or_default};

/// Transport cost per unit of distance.
pub const TRANSPORT_RATE: f64 = 2.0;

/// Range of transport costs used when a leg's distance is unknown.
pub const UNKNOWN_LEG_COST: Fallback = Fallback::Uniform {
    low: 40.0,
    high: 60.0,
};

/// A hotel picked for one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelChoice {
    /// Hotel name.
    pub name: String,
    /// Nightly price.
    pub price_per_night: f64,
}

/// Indices of a price-sorted list of `len` hotels that fall inside the
/// tier's percentile window.
///
/// Bounds are floored. A window that rounds to nothing collapses to the
/// single hotel at its lower bound, so a non-empty list always yields a
/// non-empty range.
///
/// # Examples
/// ```
/// use caravan_core::BudgetTier;
/// use caravan_planner::percentile_window;
///
/// assert_eq!(percentile_window(10, BudgetTier::Economy), 0..3);
/// assert_eq!(percentile_window(10, BudgetTier::Premium), 7..10);
/// assert_eq!(percentile_window(3, BudgetTier::Economy), 0..1);
/// ```
#[must_use]
pub fn percentile_window(len: usize, tier: BudgetTier) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let (low, high) = tier.hotel_percentile_window();
    let start = percentile_index(len, low).min(len - 1);
    let end = percentile_index(len, high).min(len);
    if end > start { start..end } else { start..start + 1 }
}

#[expect(
    clippy::integer_division,
    reason = "percentile bounds are floored by definition"
)]
const fn percentile_index(len: usize, percent: usize) -> usize {
    len.saturating_mul(percent) / 100
}

/// Pick a hotel uniformly from the tier's percentile window.
///
/// Hotels are ranked by nightly price with ties kept in catalog order. An
/// empty list yields the placeholder hotel priced uniformly within the
/// tier's placeholder range.
pub fn select_hotel<R>(
    city: &str,
    hotels: &[HotelEntry],
    tier: BudgetTier,
    rng: &mut R,
) -> HotelChoice
where
    R: Rng + ?Sized,
{
    let mut ranked: Vec<&HotelEntry> = hotels.iter().collect();
    ranked.sort_by(|left, right| left.price.total_cmp(&right.price));
    let window = percentile_window(ranked.len(), tier);
    if let Some(hotel) = ranked.get(window).and_then(|band| band.choose(rng)) {
        return HotelChoice {
            name: hotel.name.clone(),
            price_per_night: hotel.price,
        };
    }
    let (low, high) = tier.placeholder_hotel_price();
    HotelChoice {
        name: PLACEHOLDER_HOTEL.to_owned(),
        price_per_night: resolve_or_default(None, Fallback::Uniform { low, high }, rng, || {
            format!("{tier} hotels in {city}")
        }),
    }
}

/// Multiplier applied to every leg for a trip with `requested_budget`.
///
/// Tight budgets travel cheaper and generous ones travel in more comfort.
#[must_use]
pub const fn budget_scale(requested_budget: f64) -> f64 {
    if requested_budget < 1_000.0 {
        0.8
    } else if requested_budget > 5_000.0 {
        1.2
    } else {
        1.0
    }
}

/// Cost of travelling from `from` to `to`.
///
/// The base is the distance times [`TRANSPORT_RATE`], or a draw from
/// [`UNKNOWN_LEG_COST`] when the leg is unknown, scaled by
/// [`budget_scale`] of the caller's original budget.
#[expect(
    clippy::float_arithmetic,
    reason = "leg costs are derived from floating-point distances"
)]
pub fn transport_cost<D, R>(
    from: &str,
    to: &str,
    requested_budget: f64,
    data: &D,
    rng: &mut R,
) -> f64
where
    D: ReferenceData + ?Sized,
    R: Rng + ?Sized,
{
    let base = resolve_or_default(
        data.distance(from, to).map(|distance| distance * TRANSPORT_RATE),
        UNKNOWN_LEG_COST,
        rng,
        || format!("leg {from} -> {to}"),
    );
    base * budget_scale(requested_budget)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests {
    use super::*;
    use caravan_core::ReferenceCatalog;
    use caravan_core::test_support::triangle_catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[rstest]
    #[case(0, BudgetTier::Standard, 0..0)]
    #[case(1, BudgetTier::Premium, 0..1)]
    #[case(3, BudgetTier::Standard, 0..2)]
    #[case(3, BudgetTier::Premium, 2..3)]
    #[case(10, BudgetTier::Standard, 3..7)]
    fn windows_floor_their_bounds(
        #[case] len: usize,
        #[case] tier: BudgetTier,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(percentile_window(len, tier), expected);
    }

    #[rstest]
    #[case(BudgetTier::Economy, &[100.0])]
    #[case(BudgetTier::Standard, &[200.0, 300.0])]
    #[case(BudgetTier::Premium, &[400.0, 500.0])]
    fn hotels_come_from_the_tier_window(#[case] tier: BudgetTier, #[case] allowed: &[f64]) {
        let hotels = triangle_catalog().hotels("B");
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let choice = select_hotel("B", &hotels, tier, &mut rng);
            assert!(
                allowed.contains(&choice.price_per_night),
                "{} not in {allowed:?}",
                choice.price_per_night
            );
        }
    }

    #[rstest]
    fn unknown_cities_get_a_placeholder_hotel() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let choice = select_hotel("Nowhere", &[], BudgetTier::Premium, &mut rng);
        assert_eq!(choice.name, PLACEHOLDER_HOTEL);
        assert!((1_000.0..5_000.0).contains(&choice.price_per_night));
    }

    #[rstest]
    #[case(999.0, 0.8)]
    #[case(1_000.0, 1.0)]
    #[case(5_000.0, 1.0)]
    #[case(5_001.0, 1.2)]
    fn budget_scales_legs(#[case] budget: f64, #[case] expected: f64) {
        assert!((budget_scale(budget) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn known_legs_cost_twice_their_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let cost = transport_cost("C", "B", 2_000.0, &triangle_catalog(), &mut rng);
        assert!((cost - 300.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn unknown_legs_cost_between_forty_and_sixty() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let cost = transport_cost("X", "Y", 500.0, &ReferenceCatalog::default(), &mut rng);
        assert!((32.0..48.0).contains(&cost), "{cost}");
    }
}
