//! Day-by-day trip plan

use serde::{Deserialize, Serialize};

/// Single day of the schedule
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// 1-based day number
    pub day: u32,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub activities: Vec<String>,
}

/// Full itinerary from leaving home to getting back
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    pub departure_date: String,
    pub return_date: String,
    pub schedule: Vec<ScheduleEntry>,
}
