//! Choosing activities for one city visit.
//!
//! Candidates come from the [`ActivityGenerator`]; if generation fails the
//! catalog's own activities stand in. Candidates are then trimmed greedily,
//! cheapest first, to what the remaining budget allows. Names are unique
//! across one itinerary build, tracked by [`UsedActivities`].

mod prompt;

use std::collections::HashSet;

use caravan_core::{Activity, ActivityGenerator, GenerationError, ReferenceData};
use rand::Rng;
use rand::seq::SliceRandom;

pub use prompt::{activity_prompt, parse_activities};

/// Daily tier budget above which a city gets three to five activities
/// instead of one to three.
pub const GENEROUS_DAILY_BUDGET: f64 = 1_000.0;

/// Activity names already placed in the itinerary under construction.
///
/// Names compare case-insensitively with surrounding whitespace ignored,
/// so "Souk Walk" and " souk walk" are the same activity.
#[derive(Debug, Clone, Default)]
pub struct UsedActivities {
    keys: HashSet<String>,
    names: Vec<String>,
}

impl UsedActivities {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been used.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&key(name))
    }

    /// Record `name`, returning `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let inserted = self.keys.insert(key(name));
        if inserted {
            self.names.push(name.trim().to_owned());
        }
        inserted
    }

    /// Names in the order they were recorded.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Budget figures steering activity selection for one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityBudget {
    /// Tier budget divided by the trip's total days.
    pub tier_daily: f64,
    /// Tier budget minus everything committed so far, this city's hotel
    /// and arrival leg included. May be negative.
    pub remaining: f64,
}

/// How many activities to ask for, given the tier's daily budget.
///
/// # Examples
/// ```
/// use caravan_planner::desired_activity_count;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// assert!((3..=5).contains(&desired_activity_count(1_500.0, &mut rng)));
/// assert!((1..=3).contains(&desired_activity_count(200.0, &mut rng)));
/// ```
pub fn desired_activity_count<R>(tier_daily_budget: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    if tier_daily_budget > GENEROUS_DAILY_BUDGET {
        rng.gen_range(3..=5)
    } else {
        rng.gen_range(1..=3)
    }
}

/// Picks activities for successive city visits.
pub struct ActivitySelector<'a, D: ?Sized, G: ?Sized> {
    data: &'a D,
    generator: &'a G,
    catalog_fallback: bool,
}

impl<'a, D, G> ActivitySelector<'a, D, G>
where
    D: ReferenceData + ?Sized,
    G: ActivityGenerator + ?Sized,
{
    /// Selector drawing on `generator`, falling back to `data`'s activity
    /// catalog when `catalog_fallback` is set.
    pub const fn new(data: &'a D, generator: &'a G, catalog_fallback: bool) -> Self {
        Self {
            data,
            generator,
            catalog_fallback,
        }
    }

    /// Choose the activities for a visit to `city`.
    ///
    /// Never returns an empty list: when nothing is affordable the
    /// zero-cost placeholder is returned instead. Chosen names are added to
    /// `used`; the placeholder is not. A negative remaining budget skips
    /// generation entirely.
    pub fn select<R>(
        &self,
        city: &str,
        budget: ActivityBudget,
        used: &mut UsedActivities,
        rng: &mut R,
    ) -> Vec<Activity>
    where
        R: Rng + ?Sized,
    {
        if budget.remaining < 0.0 {
            log::debug!(
                "{city}: budget already exhausted ({:.2} left); using the placeholder",
                budget.remaining
            );
            return vec![Activity::placeholder()];
        }

        let wanted = desired_activity_count(budget.tier_daily, rng);
        let candidates = match self.generate(city, wanted, used) {
            Ok(generated) if !generated.is_empty() => generated,
            Ok(_) => {
                log::warn!("{city}: generator returned no usable activities");
                self.from_catalog(city, wanted, used, rng)
            }
            Err(error) => {
                log::warn!("{city}: activity generation failed: {error}");
                self.from_catalog(city, wanted, used, rng)
            }
        };

        let chosen = fit_to_budget(candidates, budget.remaining);
        if chosen.is_empty() {
            return vec![Activity::placeholder()];
        }
        for activity in &chosen {
            used.insert(&activity.name);
        }
        chosen
    }

    fn generate(
        &self,
        city: &str,
        wanted: usize,
        used: &UsedActivities,
    ) -> Result<Vec<Activity>, GenerationError> {
        let mut seen = used.clone();
        let text = self
            .generator
            .generate(&activity_prompt(city, wanted, used.names()))?;
        let mut candidates = fresh(parse_activities(&text), &mut seen, wanted);

        let shortfall = wanted.saturating_sub(candidates.len());
        if shortfall > 0 {
            log::debug!(
                "{city}: generator returned {} of {wanted}; asking for {shortfall} more",
                candidates.len()
            );
            match self
                .generator
                .generate(&activity_prompt(city, shortfall, seen.names()))
            {
                Ok(extra) => {
                    candidates.extend(fresh(parse_activities(&extra), &mut seen, shortfall));
                }
                Err(error) if candidates.is_empty() => return Err(error),
                Err(error) => log::warn!("{city}: follow-up generation failed: {error}"),
            }
        }
        Ok(candidates)
    }

    fn from_catalog<R>(
        &self,
        city: &str,
        wanted: usize,
        used: &UsedActivities,
        rng: &mut R,
    ) -> Vec<Activity>
    where
        R: Rng + ?Sized,
    {
        if !self.catalog_fallback {
            return Vec::new();
        }
        let mut seen = used.clone();
        let pool = fresh(
            self.data
                .activities(city)
                .into_iter()
                .map(|entry| Activity::new(entry.name, entry.price))
                .collect(),
            &mut seen,
            usize::MAX,
        );
        log::debug!("{city}: drawing from {} catalog activities", pool.len());
        pool.choose_multiple(rng, wanted).cloned().collect()
    }
}

/// Keep up to `limit` candidates whose names are not yet in `seen`,
/// recording each kept name.
fn fresh(candidates: Vec<Activity>, seen: &mut UsedActivities, limit: usize) -> Vec<Activity> {
    candidates
        .into_iter()
        .filter(|activity| seen.insert(&activity.name))
        .take(limit)
        .collect()
}

/// Accept candidates cheapest first while the running total stays within
/// `remaining`, stopping at the first one that does not fit.
#[expect(
    clippy::float_arithmetic,
    reason = "activity prices are summed as floating-point amounts"
)]
fn fit_to_budget(mut candidates: Vec<Activity>, remaining: f64) -> Vec<Activity> {
    candidates.sort_by(|left, right| left.price.total_cmp(&right.price));
    let mut spent = 0.0;
    let mut chosen = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if spent + candidate.price > remaining {
            break;
        }
        spent += candidate.price;
        chosen.push(candidate);
    }
    chosen
}
