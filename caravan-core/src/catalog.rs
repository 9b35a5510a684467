//! Reference data: per-city hotel and activity catalogs plus the distance
//! table.
//!
//! The [`ReferenceData`] trait is the read-only interface the planner
//! consumes. [`ReferenceCatalog`] is the in-memory snapshot implementation
//! loaded once per process from JSON or SQLite.

use std::collections::HashMap;

use crate::{DistanceEntry, DistanceTable};

/// A hotel offered in a city, priced per night.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotelEntry {
    /// City the hotel is in.
    pub city: String,
    /// Display name.
    pub name: String,
    /// Nightly price.
    pub price: f64,
    /// Optional free-form category such as `riad` or `resort`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
}

impl HotelEntry {
    /// Construct an uncategorised hotel entry.
    pub fn new(city: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            city: city.into(),
            name: name.into(),
            price,
            category: None,
        }
    }
}

/// A priced activity available in a city.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityEntry {
    /// City the activity takes place in.
    pub city: String,
    /// Display name.
    pub name: String,
    /// Price per person.
    pub price: f64,
    /// Optional free-form category such as `museum` or `tour`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
}

impl ActivityEntry {
    /// Construct an uncategorised activity entry.
    pub fn new(city: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            city: city.into(),
            name: name.into(),
            price,
            category: None,
        }
    }
}

/// Read-only access to hotels, activities and inter-city distances.
///
/// Implementations must be safe to share across threads; a planning run
/// only reads from them.
///
/// # Examples
///
/// ```rust
/// use caravan_core::{ActivityEntry, HotelEntry, ReferenceData};
///
/// struct EmptyData;
///
/// impl ReferenceData for EmptyData {
///     fn hotels(&self, _city: &str) -> Vec<HotelEntry> {
///         Vec::new()
///     }
///     fn activities(&self, _city: &str) -> Vec<ActivityEntry> {
///         Vec::new()
///     }
///     fn distance(&self, _from: &str, _to: &str) -> Option<f64> {
///         None
///     }
/// }
///
/// assert!(EmptyData.hotels("Rabat").is_empty());
/// ```
pub trait ReferenceData: Send + Sync {
    /// Hotels in `city`, in no particular order.
    fn hotels(&self, city: &str) -> Vec<HotelEntry>;

    /// Catalogued activities in `city`.
    fn activities(&self, city: &str) -> Vec<ActivityEntry>;

    /// Distance between two cities, trying both directions.
    fn distance(&self, from: &str, to: &str) -> Option<f64>;
}

impl<T: ReferenceData + ?Sized> ReferenceData for &T {
    fn hotels(&self, city: &str) -> Vec<HotelEntry> {
        (**self).hotels(city)
    }

    fn activities(&self, city: &str) -> Vec<ActivityEntry> {
        (**self).activities(city)
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        (**self).distance(from, to)
    }
}

/// Immutable in-memory snapshot of the reference data.
///
/// # Examples
/// ```
/// use caravan_core::{HotelEntry, ReferenceCatalog, ReferenceData};
///
/// let catalog = ReferenceCatalog::default()
///     .with_hotel(HotelEntry::new("Fes", "Riad Fes", 900.0))
///     .with_distance("Rabat", "Fes", 210.0);
/// assert_eq!(catalog.hotels("Fes").len(), 1);
/// assert_eq!(catalog.distance("Fes", "Rabat"), Some(210.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    hotels: HashMap<String, Vec<HotelEntry>>,
    activities: HashMap<String, Vec<ActivityEntry>>,
    distances: DistanceTable,
}

impl ReferenceCatalog {
    /// Build a catalog from flat entry lists.
    pub fn new<H, A, D>(hotels: H, activities: A, distances: D) -> Self
    where
        H: IntoIterator<Item = HotelEntry>,
        A: IntoIterator<Item = ActivityEntry>,
        D: IntoIterator<Item = DistanceEntry>,
    {
        let mut catalog = Self {
            distances: DistanceTable::from_entries(distances),
            ..Self::default()
        };
        for hotel in hotels {
            catalog.push_hotel(hotel);
        }
        for activity in activities {
            catalog.push_activity(activity);
        }
        catalog
    }

    /// Add a hotel while returning `self` for chaining.
    #[must_use]
    pub fn with_hotel(mut self, hotel: HotelEntry) -> Self {
        self.push_hotel(hotel);
        self
    }

    /// Add an activity while returning `self` for chaining.
    #[must_use]
    pub fn with_activity(mut self, activity: ActivityEntry) -> Self {
        self.push_activity(activity);
        self
    }

    /// Add a directed distance while returning `self` for chaining.
    #[must_use]
    pub fn with_distance(mut self, from: &str, to: &str, distance: f64) -> Self {
        self.distances.insert(from, to, distance);
        self
    }

    /// Insert a hotel into its city's list.
    pub fn push_hotel(&mut self, hotel: HotelEntry) {
        self.hotels.entry(hotel.city.clone()).or_default().push(hotel);
    }

    /// Insert an activity into its city's list.
    pub fn push_activity(&mut self, activity: ActivityEntry) {
        self.activities
            .entry(activity.city.clone())
            .or_default()
            .push(activity);
    }

    /// The underlying distance table.
    pub const fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Every hotel, ordered by city then insertion order.
    pub fn all_hotels(&self) -> Vec<HotelEntry> {
        let mut cities: Vec<&String> = self.hotels.keys().collect();
        cities.sort();
        cities
            .into_iter()
            .filter_map(|city| self.hotels.get(city))
            .flatten()
            .cloned()
            .collect()
    }

    /// Every activity, ordered by city then insertion order.
    pub fn all_activities(&self) -> Vec<ActivityEntry> {
        let mut cities: Vec<&String> = self.activities.keys().collect();
        cities.sort();
        cities
            .into_iter()
            .filter_map(|city| self.activities.get(city))
            .flatten()
            .cloned()
            .collect()
    }
}

impl ReferenceData for ReferenceCatalog {
    fn hotels(&self, city: &str) -> Vec<HotelEntry> {
        self.hotels.get(city).cloned().unwrap_or_default()
    }

    fn activities(&self, city: &str) -> Vec<ActivityEntry> {
        self.activities.get(city).cloned().unwrap_or_default()
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.distances.lookup(from, to)
    }
}
