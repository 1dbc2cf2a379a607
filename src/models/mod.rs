//! Data models for dive trip packages
//!
//! This module contains the typed form of an agent's answer, organised by concern:
//! - Resort: the stay, its dates and costs
//! - Flight: outbound and return legs
//! - Itinerary: the day-by-day plan
//! - Package: one complete candidate and the result set wrapping them

pub mod calendar;
pub mod flight;
pub mod itinerary;
pub mod package;
pub mod resort;

// Re-export all public types for convenient access
pub use calendar::parse_calendar_date;
pub use flight::{Flight, Flights};
pub use itinerary::{Itinerary, ScheduleEntry};
pub use package::{ResultSet, TravelPackage};
pub use resort::Resort;
