//! Flight models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_calendar_date;

/// One flight leg, possibly with layovers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Flight {
    /// Local departure time, `YYYY-MM-DDTHH:MM`
    pub departure_datetime: String,
    /// Local arrival time, `YYYY-MM-DDTHH:MM`
    pub arrival_datetime: String,
    pub airline: String,
    pub price: f64,
    /// Layover airports in travel order
    pub layovers: Vec<String>,
    /// Total duration as reported by the search, e.g. `"14h 35m"`
    pub flight_time: String,
}

impl Flight {
    #[must_use]
    pub fn departure_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.departure_datetime)
    }

    #[must_use]
    pub fn arrival_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.arrival_datetime)
    }
}

/// Round trip flights for a package
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Flights {
    pub departing_flight: Flight,
    pub returning_flight: Flight,
    pub total_flight_cost: f64,
}
