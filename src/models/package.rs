//! Travel package and result set models

use serde::{Deserialize, Serialize};

use super::{Flights, Itinerary, Resort};
use crate::error::ParseError;

/// One candidate trip: resort stay, round-trip flights and a schedule
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TravelPackage {
    pub resort: Resort,
    pub flights: Flights,
    pub itinerary: Itinerary,
    /// Resort plus flights, in `currency`
    pub total_package_cost: f64,
    /// ISO 4217 currency code
    pub currency: String,
}

impl TravelPackage {
    /// Sum of the resort and flight costs
    ///
    /// Nothing enforces that this matches `total_package_cost`.
    #[must_use]
    pub fn component_cost(&self) -> f64 {
        self.resort.total_resort_cost + self.flights.total_flight_cost
    }
}

/// All candidate packages for one planning request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub results: Vec<TravelPackage>,
}

impl ResultSet {
    #[must_use]
    pub fn new(results: Vec<TravelPackage>) -> Self {
        Self { results }
    }

    /// Deserialize a fully conformant payload into typed packages
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Cheapest package, if any
    #[must_use]
    pub fn cheapest(&self) -> Option<&TravelPackage> {
        self.results
            .iter()
            .min_by(|a, b| a.total_package_cost.total_cmp(&b.total_package_cost))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }
}
