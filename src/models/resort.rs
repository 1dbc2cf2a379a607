//! Resort stay model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_calendar_date;

/// Dive resort offer as returned by the resort search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Resort {
    /// Resort name
    pub name: String,
    /// Human-readable location (island, region, country)
    pub location: String,
    /// Check-in date, `YYYY-MM-DD`
    pub check_in: String,
    /// Check-out date, `YYYY-MM-DD`
    pub check_out: String,
    pub price_per_night: f64,
    /// Price of the whole stay for all divers
    pub total_resort_cost: f64,
    pub amenities: Vec<String>,
    /// Marine life and sites the resort advertises
    pub dive_highlights: Vec<String>,
    pub url: String,
}

impl Resort {
    /// Check-in as a calendar date, if it parses
    #[must_use]
    pub fn check_in_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.check_in)
    }

    /// Check-out as a calendar date, if it parses
    #[must_use]
    pub fn check_out_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.check_out)
    }

    /// Number of nights between check-in and check-out
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        let check_in = self.check_in_date()?;
        let check_out = self.check_out_date()?;
        Some((check_out - check_in).num_days())
    }
}
