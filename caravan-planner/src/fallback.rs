//! Substitute values for gaps in reference data.
//!
//! Every planning stage that consults the catalog routes the lookup through
//! [`resolve_or_default`], so the policy for a missing distance or price is
//! stated once per call site instead of being hidden in ad hoc branches.

use rand::Rng;

/// What to use when a lookup yields nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    /// Always the same value.
    Fixed(f64),
    /// A value drawn uniformly from `[low, high)`.
    Uniform {
        /// Inclusive lower bound.
        low: f64,
        /// Exclusive upper bound.
        high: f64,
    },
    /// Positive infinity, so the gap never wins a minimum.
    Unbounded,
}

impl Fallback {
    /// Draw the substitute value.
    ///
    /// A degenerate uniform range yields its lower bound.
    ///
    /// # Examples
    /// ```
    /// use caravan_planner::Fallback;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(1);
    /// assert_eq!(Fallback::Fixed(100.0).sample(&mut rng), 100.0);
    /// let drawn = Fallback::Uniform { low: 40.0, high: 60.0 }.sample(&mut rng);
    /// assert!((40.0..60.0).contains(&drawn));
    /// ```
    pub fn sample<R>(self, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Fixed(value) => value,
            Self::Uniform { low, high } if high > low => rng.gen_range(low..high),
            Self::Uniform { low, .. } => low,
            Self::Unbounded => f64::INFINITY,
        }
    }
}

/// Return `lookup` when present, otherwise a value drawn from `policy`.
///
/// `describe` names the missing datum for the debug log and is only
/// evaluated on a gap.
pub fn resolve_or_default<R, F>(
    lookup: Option<f64>,
    policy: Fallback,
    rng: &mut R,
    describe: F,
) -> f64
where
    R: Rng + ?Sized,
    F: FnOnce() -> String,
{
    if let Some(value) = lookup {
        return value;
    }
    let substitute = policy.sample(rng);
    log::debug!("no data for {}; using {substitute}", describe());
    substitute
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point amounts"
)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[rstest]
    fn present_values_pass_through() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let value =
            resolve_or_default(Some(12.5), Fallback::Fixed(100.0), &mut rng, || "leg".to_owned());
        assert!((value - 12.5).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(Fallback::Fixed(100.0), 100.0)]
    #[case(Fallback::Uniform { low: 5.0, high: 5.0 }, 5.0)]
    fn gaps_use_the_policy(#[case] policy: Fallback, #[case] expected: f64) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let value = resolve_or_default(None, policy, &mut rng, || "leg".to_owned());
        assert!((value - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn unbounded_gaps_are_infinite() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let value = resolve_or_default(None, Fallback::Unbounded, &mut rng, || "leg".to_owned());
        assert!(value.is_infinite());
    }

    #[rstest]
    fn uniform_draws_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let policy = Fallback::Uniform {
            low: 40.0,
            high: 60.0,
        };
        for _ in 0..200 {
            let value = policy.sample(&mut rng);
            assert!((40.0..60.0).contains(&value), "{value} out of range");
        }
    }
}
