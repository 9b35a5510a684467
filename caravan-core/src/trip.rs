//! Trip requests: the departure, destinations, date window and budget a
//! caller wants planned.

use chrono::NaiveDate;
use thiserror::Error;

/// Date format accepted by [`TripRequest::from_iso_dates`].
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters for a planning run.
///
/// The trip spans `end_date - start_date` whole days. Destinations may
/// repeat or name the departure city; [`TripRequest::distinct_destinations`]
/// removes those entries while preserving first-appearance order.
///
/// # Examples
/// ```
/// use caravan_core::TripRequest;
///
/// let request = TripRequest::from_iso_dates(
///     "Casablanca",
///     ["Rabat", "Fes"],
///     "2025-03-01",
///     "2025-03-06",
///     8_000.0,
/// )?;
/// assert_eq!(request.total_days(), 5);
/// request.validate()?;
/// # Ok::<(), caravan_core::TripRequestValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    /// City the traveller leaves from.
    pub departure: String,
    /// Cities the traveller wants to visit.
    pub destinations: Vec<String>,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Day the trip ends; must be after `start_date`.
    pub end_date: NaiveDate,
    /// Total budget for the whole trip.
    pub budget: f64,
    /// City forced as the first stop after the departure, if still unvisited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_start: Option<String>,
    /// Seed for reproducible stochastic components.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

/// Reasons a [`TripRequest`] is rejected before any planning work happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripRequestValidationError {
    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("{field} {value:?} is not a valid YYYY-MM-DD date")]
    MalformedDate {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },
    /// The end date does not fall after the start date.
    #[error("end date {end} must be after start date {start}")]
    EndNotAfterStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
    /// No destination cities were supplied.
    #[error("at least one destination city is required")]
    NoDestinations,
    /// A city name was empty or whitespace.
    #[error("city names must not be blank")]
    BlankCity,
    /// The budget was zero, negative or not finite.
    #[error("budget must be a positive amount, got {budget}")]
    InvalidBudget {
        /// Budget supplied by the caller.
        budget: f64,
    },
    /// More cities were requested than the trip has days.
    #[error("{cities} cities (including the departure) cannot fit into {days} days")]
    TooManyCities {
        /// Number of cities in the itinerary, departure included.
        cities: usize,
        /// Whole days available.
        days: i64,
    },
}

impl TripRequest {
    /// Construct a request without a preferred first stop or seed.
    pub fn new<I, S>(
        departure: impl Into<String>,
        destinations: I,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: f64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departure: departure.into(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            start_date,
            end_date,
            budget,
            preferred_start: None,
            seed: None,
        }
    }

    /// Construct a request from `YYYY-MM-DD` date strings.
    ///
    /// # Errors
    ///
    /// Returns [`TripRequestValidationError::MalformedDate`] when either
    /// date fails to parse. No other validation is performed here.
    pub fn from_iso_dates<I, S>(
        departure: impl Into<String>,
        destinations: I,
        start_date: &str,
        end_date: &str,
        budget: f64,
    ) -> Result<Self, TripRequestValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        Ok(Self::new(departure, destinations, start, end, budget))
    }

    /// Force `city` as the first stop after the departure.
    #[must_use]
    pub fn with_preferred_start(mut self, city: impl Into<String>) -> Self {
        self.preferred_start = Some(city.into());
        self
    }

    /// Fix the seed used by the planner's random source.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whole days between the start and end dates.
    ///
    /// Negative or zero for requests that fail validation.
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Destination cities with duplicates and the departure removed.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use caravan_core::TripRequest;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let request = TripRequest::new("A", ["B", "A", "C", "B"], day, day, 1.0);
    /// assert_eq!(request.distinct_destinations(), vec!["B", "C"]);
    /// ```
    pub fn distinct_destinations(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.destinations.len());
        for city in &self.destinations {
            if *city != self.departure && !seen.contains(city) {
                seen.push(city.clone());
            }
        }
        seen
    }

    /// Check the request can be planned.
    ///
    /// Every itinerary gives the departure city and each distinct
    /// destination at least one day, so their combined count must not
    /// exceed the trip length.
    ///
    /// # Errors
    ///
    /// Returns the first [`TripRequestValidationError`] encountered.
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        if self.departure.trim().is_empty() {
            return Err(TripRequestValidationError::BlankCity);
        }
        if self.destinations.is_empty() {
            return Err(TripRequestValidationError::NoDestinations);
        }
        if self.destinations.iter().any(|city| city.trim().is_empty()) {
            return Err(TripRequestValidationError::BlankCity);
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(TripRequestValidationError::InvalidBudget {
                budget: self.budget,
            });
        }
        if self.end_date <= self.start_date {
            return Err(TripRequestValidationError::EndNotAfterStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        let days = self.total_days();
        let cities = self.distinct_destinations().len() + 1;
        let fits = i64::try_from(cities).is_ok_and(|count| count <= days);
        if !fits {
            return Err(TripRequestValidationError::TooManyCities { cities, days });
        }
        Ok(())
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, TripRequestValidationError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| {
        TripRequestValidationError::MalformedDate {
            field,
            value: value.to_owned(),
        }
    })
}
