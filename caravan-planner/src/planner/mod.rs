//! `TripPlanner`, the default [`Planner`] implementation.

use caravan_core::{ActivityGenerator, PlanError, PlanResult, Planner, ReferenceData, TripRequest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::assembler::ItineraryAssembler;
use crate::context::PlanningContext;
use crate::tiers::{ProbeReport, TierResolver};

/// Configuration for [`TripPlanner`].
#[derive(Debug, Clone)]
pub struct TripPlannerConfig {
    /// Distance assumed for legs missing from the reference data when
    /// weighting days.
    pub placeholder_leg_distance: f64,
    /// Draw activities from the catalog when generation fails.
    pub catalog_fallback: bool,
}

impl Default for TripPlannerConfig {
    fn default() -> Self {
        Self {
            placeholder_leg_distance: 100.0,
            catalog_fallback: true,
        }
    }
}

impl TripPlannerConfig {
    /// Replace the placeholder leg distance.
    #[must_use]
    pub const fn with_placeholder_leg_distance(mut self, distance: f64) -> Self {
        self.placeholder_leg_distance = distance;
        self
    }

    /// Enable or disable the catalog activity fallback.
    #[must_use]
    pub const fn with_catalog_fallback(mut self, enabled: bool) -> Self {
        self.catalog_fallback = enabled;
        self
    }
}

/// Plans multi-city trips from reference data and generated activities.
///
/// The planner is generic over its two collaborators: a read-only
/// [`ReferenceData`] source and an [`ActivityGenerator`]. Randomness comes
/// from a `ChaCha8` generator seeded by [`TripRequest::seed`], so a seeded
/// request with deterministic collaborators always yields the same plans.
pub struct TripPlanner<D, G>
where
    D: ReferenceData,
    G: ActivityGenerator,
{
    data: D,
    generator: G,
    config: TripPlannerConfig,
}

impl<D, G> TripPlanner<D, G>
where
    D: ReferenceData,
    G: ActivityGenerator,
{
    /// Construct a planner using default configuration.
    pub fn new(data: D, generator: G) -> Self {
        Self::with_config(data, generator, TripPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(data: D, generator: G, config: TripPlannerConfig) -> Self {
        Self {
            data,
            generator,
            config,
        }
    }

    /// Build the per-tier probe itineraries without resolving plans.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRequest`] when the request fails
    /// validation.
    pub fn probe(&self, request: &TripRequest) -> Result<ProbeReport, PlanError> {
        let context = PlanningContext::from_request(request)?;
        let mut rng = rng_for(request.seed);
        Ok(self.resolver().probe(&context, &mut rng))
    }

    fn resolver(&self) -> TierResolver<'_, D, G> {
        TierResolver::new(ItineraryAssembler::new(
            &self.data,
            &self.generator,
            &self.config,
        ))
    }
}

impl<D, G> Planner for TripPlanner<D, G>
where
    D: ReferenceData,
    G: ActivityGenerator,
{
    fn generate_plans(&self, request: &TripRequest) -> Result<Vec<PlanResult>, PlanError> {
        let context = PlanningContext::from_request(request)?;
        log::info!(
            "planning {} days from {} through {} destinations",
            context.total_days,
            context.departure,
            context.destinations.len()
        );
        let mut rng = rng_for(request.seed);
        self.resolver().resolve(&context, &mut rng)
    }
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests;
