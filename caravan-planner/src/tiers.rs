//! Deciding which tiers to offer.
//!
//! One probe itinerary is built per tier at that tier's fixed share of the
//! budget. The most expensive tier whose probe fits the caller's budget
//! decides the three share bands from which the final plans are drawn.

use caravan_core::{ActivityGenerator, BudgetTier, PlanError, PlanResult, ReferenceData};
use rand::Rng;
use serde::Serialize;

use crate::assembler::ItineraryAssembler;
use crate::context::PlanningContext;

/// Outcome of building one tier's probe itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProbe {
    /// Tier probed.
    pub tier: BudgetTier,
    /// Share of the requested budget the probe was built with.
    pub share: f64,
    /// `requested_budget × share`.
    pub tier_budget: f64,
    /// Total cost of the probe itinerary.
    pub total_cost: f64,
    /// Whether the probe costs no more than the requested budget.
    pub feasible: bool,
}

/// Probe outcomes for every tier, cheapest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    /// Budget supplied by the caller.
    pub requested_budget: f64,
    /// One probe per tier, in [`BudgetTier::ALL`] order.
    pub probes: Vec<TierProbe>,
}

/// Range of budget shares a plan is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareBand {
    /// Tier label of the resulting plan.
    pub tier: BudgetTier,
    /// Inclusive lower share.
    pub low: f64,
    /// Exclusive upper share.
    pub high: f64,
}

impl ShareBand {
    const fn new(tier: BudgetTier, low: f64, high: f64) -> Self {
        Self { tier, low, high }
    }

    /// Draw a share uniformly from the band.
    pub fn draw<R>(&self, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        if self.high > self.low {
            rng.gen_range(self.low..self.high)
        } else {
            self.low
        }
    }
}

impl ProbeReport {
    /// The probe for `tier`, if it was run.
    #[must_use]
    pub fn probe(&self, tier: BudgetTier) -> Option<&TierProbe> {
        self.probes.iter().find(|probe| probe.tier == tier)
    }

    /// Whether `tier`'s probe fits the requested budget.
    #[must_use]
    pub fn is_feasible(&self, tier: BudgetTier) -> bool {
        self.probe(tier).is_some_and(|probe| probe.feasible)
    }

    /// The most expensive feasible tier, or `None` when the economy probe
    /// does not fit.
    ///
    /// Economy gates everything: a pricier tier that happens to fit does not
    /// rescue a request whose cheapest itinerary overspends.
    #[must_use]
    pub fn best_feasible(&self) -> Option<BudgetTier> {
        if !self.is_feasible(BudgetTier::Economy) {
            return None;
        }
        [BudgetTier::Premium, BudgetTier::Standard]
            .into_iter()
            .find(|tier| self.is_feasible(*tier))
            .or(Some(BudgetTier::Economy))
    }

    /// Share bands for the three plans to offer, in output order.
    ///
    /// | Best feasible | Plans                                                 |
    /// |---------------|-------------------------------------------------------|
    /// | Premium       | Premium 0.8–1.0, Standard 0.5–0.8, Economy 0.3–0.5    |
    /// | Standard      | Standard 0.5–0.8, Economy 0.35–0.5, Economy 0.3–0.35  |
    /// | Economy       | Economy 0.4–0.5, Economy 0.35–0.4, Economy 0.3–0.35   |
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InfeasibleBudget`] when the economy probe exceeds
    /// the requested budget, whatever the other probes cost.
    pub fn offered_bands(&self) -> Result<[ShareBand; 3], PlanError> {
        use BudgetTier::{Economy, Premium, Standard};

        match self.best_feasible() {
            Some(Premium) => Ok([
                ShareBand::new(Premium, 0.8, 1.0),
                ShareBand::new(Standard, 0.5, 0.8),
                ShareBand::new(Economy, 0.3, 0.5),
            ]),
            Some(Standard) => Ok([
                ShareBand::new(Standard, 0.5, 0.8),
                ShareBand::new(Economy, 0.35, 0.5),
                ShareBand::new(Economy, 0.3, 0.35),
            ]),
            Some(Economy) => Ok([
                ShareBand::new(Economy, 0.4, 0.5),
                ShareBand::new(Economy, 0.35, 0.4),
                ShareBand::new(Economy, 0.3, 0.35),
            ]),
            None => Err(PlanError::InfeasibleBudget {
                budget: self.requested_budget,
                economy_cost: self
                    .probe(Economy)
                    .map_or(f64::INFINITY, |probe| probe.total_cost),
            }),
        }
    }
}

/// Runs the probes and builds the offered plans.
pub struct TierResolver<'a, D: ?Sized, G: ?Sized> {
    assembler: ItineraryAssembler<'a, D, G>,
}

impl<'a, D, G> TierResolver<'a, D, G>
where
    D: ReferenceData + ?Sized,
    G: ActivityGenerator + ?Sized,
{
    /// Resolver building every itinerary with `assembler`.
    pub const fn new(assembler: ItineraryAssembler<'a, D, G>) -> Self {
        Self { assembler }
    }

    /// Build one probe itinerary per tier.
    pub fn probe<R>(&self, context: &PlanningContext, rng: &mut R) -> ProbeReport
    where
        R: Rng + ?Sized,
    {
        let probes = BudgetTier::ALL
            .into_iter()
            .map(|tier| {
                let share = tier.probe_share();
                let tier_budget = context.budget_for(share);
                let itinerary = self.assembler.build(context, tier, tier_budget, rng);
                let feasible = itinerary.total_cost <= context.requested_budget;
                log::debug!(
                    "{tier} probe costs {:.2} against {:.2} (feasible: {feasible})",
                    itinerary.total_cost,
                    context.requested_budget
                );
                TierProbe {
                    tier,
                    share,
                    tier_budget,
                    total_cost: itinerary.total_cost,
                    feasible,
                }
            })
            .collect();
        ProbeReport {
            requested_budget: context.requested_budget,
            probes,
        }
    }

    /// Probe the tiers and build the three offered plans.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InfeasibleBudget`] when no tier is feasible.
    pub fn resolve<R>(
        &self,
        context: &PlanningContext,
        rng: &mut R,
    ) -> Result<Vec<PlanResult>, PlanError>
    where
        R: Rng + ?Sized,
    {
        let report = self.probe(context, rng);
        let bands = report.offered_bands()?;
        log::info!(
            "offering {} plans for a budget of {:.2}",
            bands.first().map_or(BudgetTier::Economy, |band| band.tier),
            context.requested_budget
        );
        Ok(bands
            .iter()
            .map(|band| {
                let share = band.draw(rng);
                let tier_budget = context.budget_for(share);
                let itinerary = self.assembler.build(context, band.tier, tier_budget, rng);
                PlanResult::new(band.tier, share, context.requested_budget, itinerary)
            })
            .collect())
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn report(costs: [f64; 3], budget: f64) -> ProbeReport {
        ProbeReport {
            requested_budget: budget,
            probes: BudgetTier::ALL
                .into_iter()
                .zip(costs)
                .map(|(tier, total_cost)| TierProbe {
                    tier,
                    share: tier.probe_share(),
                    tier_budget: budget * tier.probe_share(),
                    total_cost,
                    feasible: total_cost <= budget,
                })
                .collect(),
        }
    }

    fn tiers(bands: &[ShareBand; 3]) -> Vec<BudgetTier> {
        bands.iter().map(|band| band.tier).collect()
    }

    #[rstest]
    #[case([100.0, 200.0, 300.0], vec![BudgetTier::Premium, BudgetTier::Standard, BudgetTier::Economy])]
    #[case([100.0, 200.0, 3_000.0], vec![BudgetTier::Standard, BudgetTier::Economy, BudgetTier::Economy])]
    #[case([100.0, 2_000.0, 3_000.0], vec![BudgetTier::Economy; 3])]
    fn best_feasible_tier_decides_the_bands(
        #[case] costs: [f64; 3],
        #[case] expected: Vec<BudgetTier>,
    ) {
        let bands = report(costs, 1_000.0).offered_bands().expect("feasible");
        assert_eq!(tiers(&bands), expected);
        assert!(bands.iter().all(|band| band.low < band.high && band.high <= 1.0));
    }

    #[rstest]
    fn infeasible_economy_is_an_error() {
        let err = report([1_500.0, 2_000.0, 3_000.0], 1_000.0)
            .offered_bands()
            .expect_err("nothing fits");
        assert_eq!(
            err,
            PlanError::InfeasibleBudget {
                budget: 1_000.0,
                economy_cost: 1_500.0,
            }
        );
    }

    #[rstest]
    #[case([1_500.0, 2_000.0, 900.0])]
    #[case([1_500.0, 800.0, 3_000.0])]
    #[case([1_500.0, 700.0, 900.0])]
    fn pricier_tiers_cannot_rescue_an_infeasible_economy(#[case] costs: [f64; 3]) {
        let probes = report(costs, 1_000.0);
        assert_eq!(probes.best_feasible(), None);
        let err = probes.offered_bands().expect_err("economy overspends");
        assert_eq!(
            err,
            PlanError::InfeasibleBudget {
                budget: 1_000.0,
                economy_cost: 1_500.0,
            }
        );
    }

    #[rstest]
    fn cost_equal_to_budget_is_feasible() {
        let probes = report([1_000.0, 1_000.0, 1_000.0], 1_000.0);
        assert_eq!(probes.best_feasible(), Some(BudgetTier::Premium));
    }

    #[rstest]
    fn draws_stay_inside_the_band() {
        use rand::SeedableRng;

        let band = ShareBand::new(BudgetTier::Economy, 0.3, 0.35);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(17);
        for _ in 0..100 {
            let share = band.draw(&mut rng);
            assert!((0.3..0.35).contains(&share));
        }
    }
}
