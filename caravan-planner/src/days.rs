//! Splitting the trip's days across the route.

use caravan_core::ReferenceData;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::fallback::{Fallback, resolve_or_default};

/// Weight of each stop: the length of the leg arriving there.
///
/// The departure has no incoming leg and weighs zero, so it keeps its single
/// day unless every weight is zero. Unknown legs weigh
/// `placeholder_distance`.
pub fn leg_weights<D, R>(
    route: &[String],
    data: &D,
    placeholder_distance: f64,
    rng: &mut R,
) -> Vec<f64>
where
    D: ReferenceData + ?Sized,
    R: Rng + ?Sized,
{
    let Some((departure, destinations)) = route.split_first() else {
        return Vec::new();
    };
    let mut previous = departure;
    let mut weights = Vec::with_capacity(route.len());
    weights.push(0.0);
    for city in destinations {
        weights.push(resolve_or_default(
            data.distance(previous, city),
            Fallback::Fixed(placeholder_distance),
            rng,
            || format!("leg {previous} -> {city}"),
        ));
        previous = city;
    }
    weights
}

/// Allocate `total_days` across stops in proportion to `weights`.
///
/// Every stop gets one day; each remaining day goes to a stop drawn with
/// probability proportional to its weight. When the weights cannot form a
/// distribution (all zero, for instance) the draw is uniform. The result
/// always sums to `total_days` when there are at least as many days as
/// stops.
///
/// # Examples
/// ```
/// use caravan_planner::allocate_days;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(9);
/// let days = allocate_days(&[0.0, 100.0, 150.0], 7, &mut rng);
/// assert_eq!(days.iter().sum::<u32>(), 7);
/// assert!(days.iter().all(|&d| d >= 1));
/// ```
pub fn allocate_days<R>(weights: &[f64], total_days: u32, rng: &mut R) -> Vec<u32>
where
    R: Rng + ?Sized,
{
    let stops = weights.len();
    let mut days = vec![1_u32; stops];
    let Some(first) = days.first_mut() else {
        return days;
    };
    let assigned = u32::try_from(stops).unwrap_or(u32::MAX);
    let spare = total_days.saturating_sub(assigned);
    if stops == 1 {
        *first += spare;
        return days;
    }

    let distribution = WeightedIndex::new(weights.iter().copied()).ok();
    if distribution.is_none() {
        log::debug!("day weights {weights:?} are degenerate; spreading days uniformly");
    }
    for _ in 0..spare {
        let index = match &distribution {
            Some(weighted) => weighted.sample(rng),
            None => rng.gen_range(0..stops),
        };
        if let Some(slot) = days.get_mut(index) {
            *slot += 1;
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use caravan_core::ReferenceCatalog;
    use caravan_core::test_support::triangle_catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn route(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[rstest]
    fn weights_follow_incoming_legs() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let weights = leg_weights(&route(&["A", "B", "C"]), &triangle_catalog(), 100.0, &mut rng);
        assert_eq!(weights, vec![0.0, 100.0, 150.0]);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(42)]
    fn departure_keeps_a_single_day(#[case] seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let weights = leg_weights(&route(&["A", "B", "C"]), &triangle_catalog(), 100.0, &mut rng);
        let days = allocate_days(&weights, 12, &mut rng);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.iter().sum::<u32>(), 12);
    }

    #[rstest]
    fn unknown_legs_use_the_placeholder() {
        let catalog = ReferenceCatalog::default().with_distance("A", "B", 40.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let weights = leg_weights(&route(&["A", "B", "Q"]), &catalog, 100.0, &mut rng);
        assert_eq!(weights, vec![0.0, 40.0, 100.0]);
    }

    #[rstest]
    fn single_stop_takes_every_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(allocate_days(&[0.0], 6, &mut rng), vec![6]);
    }

    #[rstest]
    fn no_stops_means_no_days() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(allocate_days(&[], 6, &mut rng).is_empty());
    }

    #[rstest]
    fn exact_fit_gives_one_day_each() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(allocate_days(&[1.0, 2.0, 3.0], 3, &mut rng), vec![1, 1, 1]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(99)]
    fn zero_weights_still_sum(#[case] seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let days = allocate_days(&[0.0, 0.0, 0.0], 10, &mut rng);
        assert_eq!(days.iter().sum::<u32>(), 10);
        assert!(days.iter().all(|&day| day >= 1));
    }

    #[rstest]
    fn zero_weight_stops_get_no_extra_days() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let days = allocate_days(&[0.0, 5.0], 9, &mut rng);
        assert_eq!(days, vec![1, 8]);
    }
}
