//! Trip request handed to the planning agent
//!
//! Requests come from free-form user input. [`TripRequest::normalized`]
//! clamps them into the ranges the resort and flight searches can serve.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::DiveTripError;

pub const MAX_LOCATION_LENGTH: usize = 50;
pub const MAX_DIVERS: u32 = 4;
pub const MAX_NIGHTS: u32 = 14;
pub const MAX_ANIMALS: usize = 5;
pub const DEFAULT_ANIMAL: &str = "sharks";
pub const DEFAULT_AIRPORT: &str = "LAS";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// What the diver asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Country or dive region
    pub location: String,
    pub num_divers: u32,
    pub num_nights: u32,
    /// Marine life the divers want to see
    pub animals: Vec<String>,
    /// Full English month name
    pub month: String,
    pub year: i32,
    /// IATA code of the home airport
    pub departure_airport: String,
}

/// Split a comma-delimited list, dropping blanks
#[must_use]
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 1-based month number for a full English month name, any case
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTHS
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// One candidate stay, check-in to check-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Every stay of `nights` nights that fits inside the month
///
/// Stays starting before `today` are left out. The last night may end on the
/// final day of the month but not after it.
#[must_use]
pub fn possible_date_ranges(
    year: i32,
    month: u32,
    nights: u32,
    today: NaiveDate,
) -> Vec<DateRange> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last) = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
    else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|start| *start <= last)
        .filter(|start| *start >= today)
        .filter_map(|start| {
            let end = start.checked_add_days(Days::new(u64::from(nights)))?;
            (end <= last).then_some(DateRange {
                start_date: start,
                end_date: end,
            })
        })
        .collect()
}

fn canonical_month(name: &str) -> Option<&'static str> {
    month_number(name).map(|n| MONTHS[(n - 1) as usize])
}

impl TripRequest {
    /// Clamp every field into range
    ///
    /// `ideal_months` is the recommendation for the location and animals; its
    /// first entry replaces an unrecognised month. `today` decides whether the
    /// requested month has already passed.
    pub fn normalized(
        mut self,
        ideal_months: &[String],
        today: NaiveDate,
    ) -> Result<Self, DiveTripError> {
        if self.location.chars().count() > MAX_LOCATION_LENGTH {
            warn!(max = MAX_LOCATION_LENGTH, "location too long, truncating");
            self.location = self.location.chars().take(MAX_LOCATION_LENGTH).collect();
        }

        if self.num_divers == 0 {
            warn!("at least one diver is required, using 1");
            self.num_divers = 1;
        } else if self.num_divers > MAX_DIVERS {
            warn!(max = MAX_DIVERS, "too many divers, using maximum");
            self.num_divers = MAX_DIVERS;
        }

        if self.num_nights == 0 {
            warn!("at least one night is required, using 1");
            self.num_nights = 1;
        } else if self.num_nights > MAX_NIGHTS {
            warn!(max = MAX_NIGHTS, "too many nights, using maximum");
            self.num_nights = MAX_NIGHTS;
        }

        self.animals = self
            .animals
            .iter()
            .map(|animal| animal.trim())
            .filter(|animal| !animal.is_empty())
            .map(str::to_string)
            .collect();
        if self.animals.is_empty() {
            warn!(default = DEFAULT_ANIMAL, "no marine animals given");
            self.animals.push(DEFAULT_ANIMAL.to_string());
        } else if self.animals.len() > MAX_ANIMALS {
            warn!(max = MAX_ANIMALS, "too many animals, keeping the first ones");
            self.animals.truncate(MAX_ANIMALS);
        }

        self.month = match canonical_month(&self.month) {
            Some(month) => month.to_string(),
            None => {
                let fallback = ideal_months
                    .first()
                    .and_then(|m| canonical_month(m))
                    .ok_or_else(|| {
                        DiveTripError::validation(format!(
                            "'{}' is not a month and no ideal month is known",
                            self.month
                        ))
                    })?;
                warn!(requested = %self.month, fallback, "not a valid month");
                fallback.to_string()
            }
        };
        if !ideal_months
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(&self.month))
        {
            warn!(
                month = %self.month,
                location = %self.location,
                "month is not ideal for diving there"
            );
        }

        let month = month_number(&self.month).unwrap_or(1);
        if self.year < today.year() || (self.year == today.year() && today.month() > month) {
            warn!(year = self.year, "trip would be in the past, moving to next year");
            self.year = today.year() + 1;
        }

        let airport = self.departure_airport.trim();
        let is_iata = airport.len() == 3 && airport.chars().all(|c| c.is_ascii_alphabetic());
        self.departure_airport = if is_iata {
            airport.to_ascii_uppercase()
        } else {
            warn!(airport, default = DEFAULT_AIRPORT, "invalid IATA code");
            DEFAULT_AIRPORT.to_string()
        };

        Ok(self)
    }

    /// Candidate stays for the requested month, year and nights
    pub fn stay_windows(&self, today: NaiveDate) -> Result<Vec<DateRange>, DiveTripError> {
        let month = month_number(&self.month).ok_or_else(|| {
            DiveTripError::validation(format!("'{}' is not a month", self.month))
        })?;
        let windows = possible_date_ranges(self.year, month, self.num_nights, today);
        if windows.is_empty() {
            warn!(
                month = %self.month,
                year = self.year,
                nights = self.num_nights,
                "no stay fits in the requested month"
            );
        }
        Ok(windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn request() -> TripRequest {
        TripRequest {
            location: "Fiji".to_string(),
            num_divers: 2,
            num_nights: 5,
            animals: vec!["sharks".to_string()],
            month: "October".to_string(),
            year: 2026,
            departure_airport: "LAX".to_string(),
        }
    }

    fn ideal() -> Vec<String> {
        parse_list("June, July, August")
    }

    #[test]
    fn test_valid_request_is_unchanged() {
        let normalized = request().normalized(&ideal(), today()).unwrap();
        assert_eq!(normalized, request());
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(4, 4)]
    #[case(9, 4)]
    fn test_divers_clamped(#[case] given: u32, #[case] expected: u32) {
        let mut r = request();
        r.num_divers = given;
        assert_eq!(r.normalized(&ideal(), today()).unwrap().num_divers, expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(14, 14)]
    #[case(30, 14)]
    fn test_nights_clamped(#[case] given: u32, #[case] expected: u32) {
        let mut r = request();
        r.num_nights = given;
        assert_eq!(r.normalized(&ideal(), today()).unwrap().num_nights, expected);
    }

    #[test]
    fn test_location_truncated() {
        let mut r = request();
        r.location = "x".repeat(80);
        let normalized = r.normalized(&ideal(), today()).unwrap();
        assert_eq!(normalized.location.len(), MAX_LOCATION_LENGTH);
    }

    #[test]
    fn test_animals_default_and_limit() {
        let mut r = request();
        r.animals = vec![" ".to_string(), String::new()];
        assert_eq!(r.normalized(&ideal(), today()).unwrap().animals, vec!["sharks"]);

        let mut r = request();
        r.animals = parse_list("a, b, c, d, e, f, g");
        assert_eq!(r.normalized(&ideal(), today()).unwrap().animals.len(), MAX_ANIMALS);
    }

    #[test]
    fn test_month_canonicalised_and_replaced() {
        let mut r = request();
        r.month = "december".to_string();
        assert_eq!(r.normalized(&ideal(), today()).unwrap().month, "December");

        let mut r = request();
        r.month = "Smarch".to_string();
        r.year = 2027;
        assert_eq!(r.normalized(&ideal(), today()).unwrap().month, "June");
    }

    #[test]
    fn test_invalid_month_without_fallback_is_error() {
        let mut r = request();
        r.month = "Smarch".to_string();
        let err = r.normalized(&[], today()).unwrap_err();
        assert!(matches!(err, DiveTripError::Validation { .. }));
    }

    #[rstest]
    #[case("March", 2026, 2027)]
    #[case("October", 2026, 2026)]
    #[case("December", 2026, 2026)]
    #[case("December", 2024, 2027)]
    #[case("January", 2028, 2028)]
    fn test_past_trips_move_to_next_year(
        #[case] month: &str,
        #[case] year: i32,
        #[case] expected: i32,
    ) {
        let mut r = request();
        r.month = month.to_string();
        r.year = year;
        assert_eq!(r.normalized(&ideal(), today()).unwrap().year, expected);
    }

    #[rstest]
    #[case("lax", "LAX")]
    #[case(" sfo ", "SFO")]
    #[case("LA", "LAS")]
    #[case("L4X", "LAS")]
    #[case("KLAX", "LAS")]
    fn test_departure_airport(#[case] given: &str, #[case] expected: &str) {
        let mut r = request();
        r.departure_airport = given.to_string();
        assert_eq!(r.normalized(&ideal(), today()).unwrap().departure_airport, expected);
    }

    #[rstest]
    // 5 nights in June: last check-in on the 25th
    #[case(2027, 6, 5, 25, Some("2027-06-01"), Some("2027-06-25"))]
    // leap-year February has 29 days
    #[case(2028, 2, 3, 26, Some("2028-02-01"), Some("2028-02-26"))]
    #[case(2027, 2, 3, 25, Some("2027-02-01"), Some("2027-02-25"))]
    // longer than the month
    #[case(2027, 6, 31, 0, None, None)]
    #[case(2027, 7, 30, 1, Some("2027-07-01"), Some("2027-07-01"))]
    // October 2026 is partly past on the 16th
    #[case(2026, 10, 5, 11, Some("2026-10-16"), Some("2026-10-26"))]
    #[case(2026, 9, 2, 0, None, None)]
    fn test_possible_date_ranges(
        #[case] year: i32,
        #[case] month: u32,
        #[case] nights: u32,
        #[case] count: usize,
        #[case] first_start: Option<&str>,
        #[case] last_start: Option<&str>,
    ) {
        let start = |range: Option<&DateRange>| range.map(|r| r.start_date.to_string());
        let windows = possible_date_ranges(year, month, nights, today());

        assert_eq!(windows.len(), count);
        assert_eq!(start(windows.first()).as_deref(), first_start);
        assert_eq!(start(windows.last()).as_deref(), last_start);
        for window in &windows {
            assert_eq!((window.end_date - window.start_date).num_days(), i64::from(nights));
            assert_eq!(window.end_date.month(), month);
        }
    }

    #[test]
    fn test_invalid_month_number_has_no_ranges() {
        assert!(possible_date_ranges(2027, 13, 3, today()).is_empty());
    }

    #[test]
    fn test_stay_windows_from_request() {
        let mut r = request();
        r.year = 2027;
        r.month = "March".to_string();
        r.num_nights = 7;
        let windows = r.stay_windows(today()).unwrap();
        assert_eq!(windows.len(), 24);
        assert_eq!(
            serde_json::to_value(windows[0]).unwrap(),
            serde_json::json!({"startDate": "2027-03-01", "endDate": "2027-03-08"})
        );

        r.month = "Smarch".to_string();
        assert!(matches!(
            r.stay_windows(today()),
            Err(DiveTripError::Validation { .. })
        ));
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("  SEPTEMBER "), Some(9));
        assert_eq!(month_number("Sept"), None);
    }
}
