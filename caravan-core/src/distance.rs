//! Pairwise inter-city distances.
//!
//! Storage may be asymmetric: the forward and reverse entries for a pair can
//! differ or be missing. [`DistanceTable::lookup`] tries the forward entry
//! first and then the reverse one; resolving a complete miss is left to the
//! caller's fallback policy.

use std::collections::HashMap;

/// One stored distance between two named cities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceEntry {
    /// Origin city.
    pub from: String,
    /// Destination city.
    pub to: String,
    /// Non-negative travel distance.
    pub distance: f64,
}

impl DistanceEntry {
    /// Construct an entry.
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// Lookup from an ordered city pair to a travel distance.
///
/// # Examples
/// ```
/// use caravan_core::DistanceTable;
///
/// let mut table = DistanceTable::new();
/// table.insert("Rabat", "Fes", 210.0);
/// assert_eq!(table.lookup("Rabat", "Fes"), Some(210.0));
/// assert_eq!(table.lookup("Fes", "Rabat"), Some(210.0));
/// assert_eq!(table.lookup("Fes", "Agadir"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    edges: HashMap<String, HashMap<String, f64>>,
}

impl DistanceTable {
    /// Construct an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from stored entries.
    ///
    /// Later entries for the same ordered pair replace earlier ones; entries
    /// with a negative or non-finite distance are skipped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DistanceEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.from, entry.to, entry.distance);
        }
        table
    }

    /// Store the distance for the ordered pair `from -> to`.
    ///
    /// Negative or non-finite distances are ignored with a warning.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) {
        let origin = from.into();
        let target = to.into();
        if !distance.is_finite() || distance < 0.0 {
            log::warn!("ignoring invalid distance {distance} from {origin} to {target}");
            return;
        }
        self.edges.entry(origin).or_default().insert(target, distance);
    }

    /// Distance for the exact ordered pair, without trying the reverse.
    pub fn directed(&self, from: &str, to: &str) -> Option<f64> {
        self.edges.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Distance between two cities, trying `from -> to` then `to -> from`.
    pub fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        self.directed(from, to).or_else(|| self.directed(to, from))
    }

    /// Number of stored ordered pairs.
    pub fn len(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.edges.values().all(HashMap::is_empty)
    }

    /// Stored entries sorted by origin then destination.
    pub fn entries(&self) -> Vec<DistanceEntry> {
        let mut entries: Vec<DistanceEntry> = self
            .edges
            .iter()
            .flat_map(|(from, row)| {
                row.iter()
                    .map(move |(to, distance)| DistanceEntry::new(from.clone(), to.clone(), *distance))
            })
            .collect();
        entries.sort_by(|lhs, rhs| lhs.from.cmp(&rhs.from).then_with(|| lhs.to.cmp(&rhs.to)));
        entries
    }
}
