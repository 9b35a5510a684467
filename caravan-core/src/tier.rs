//! Budget tiers describing how generously a plan spends.
//!
//! The enum offers compile-time safety for tier-dependent pricing rules.
//!
//! # Examples
//! ```
//! use caravan_core::BudgetTier;
//!
//! assert_eq!(BudgetTier::Economy.as_str(), "economy");
//! assert!(BudgetTier::Economy < BudgetTier::Premium);
//! ```

use thiserror::Error;

/// Generosity band applied to hotel, activity and budget decisions.
///
/// Ordering follows generosity: `Economy < Standard < Premium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BudgetTier {
    /// Cheapest accommodation band.
    Economy,
    /// Mid-range accommodation band.
    Standard,
    /// Most expensive accommodation band.
    Premium,
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown budget tier '{0}'")]
pub struct ParseBudgetTierError(pub String);

impl BudgetTier {
    /// All tiers from least to most generous.
    pub const ALL: [Self; 3] = [Self::Economy, Self::Standard, Self::Premium];

    /// Return the tier as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Share of the requested budget used to probe this tier's feasibility.
    ///
    /// # Examples
    /// ```
    /// use caravan_core::BudgetTier;
    ///
    /// assert_eq!(BudgetTier::Standard.probe_share(), 0.5);
    /// ```
    pub const fn probe_share(self) -> f64 {
        match self {
            Self::Economy => 0.3,
            Self::Standard => 0.5,
            Self::Premium => 0.8,
        }
    }

    /// Percentile window `[low, high)` of a price-sorted hotel list, in
    /// percent.
    pub const fn hotel_percentile_window(self) -> (usize, usize) {
        match self {
            Self::Economy => (0, 30),
            Self::Standard => (30, 70),
            Self::Premium => (70, 100),
        }
    }

    /// Nightly price range `[low, high)` for a placeholder hotel when a city
    /// has no catalog entries.
    pub const fn placeholder_hotel_price(self) -> (f64, f64) {
        match self {
            Self::Economy => (100.0, 200.0),
            Self::Standard => (200.0, 1_000.0),
            Self::Premium => (1_000.0, 5_000.0),
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BudgetTier {
    type Err = ParseBudgetTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            _ => Err(ParseBudgetTierError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(BudgetTier::Premium.to_string(), BudgetTier::Premium.as_str());
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(BudgetTier::from_str("Standard"), Ok(BudgetTier::Standard));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = BudgetTier::from_str("luxury").unwrap_err();
        assert!(err.to_string().contains("unknown budget tier"));
    }

    #[test]
    fn tiers_are_ordered_by_generosity() {
        let mut tiers = [BudgetTier::Premium, BudgetTier::Economy, BudgetTier::Standard];
        tiers.sort();
        assert_eq!(tiers, BudgetTier::ALL);
    }
}
