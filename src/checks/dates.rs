//! Flights must bracket the resort stay
//!
//! For every package the outbound flight has to land on or before check-in
//! and the return flight has to leave on or after check-out. Only calendar
//! dates are compared; a 23:00 arrival on the check-in day is consistent.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use super::{Check, CheckKind, CheckOutcome, Violation, ViolationKind, field_at, results_of};
use crate::error::ParseError;
use crate::models::parse_calendar_date;

const CHECK_IN: &[&str] = &["resort", "check_in"];
const CHECK_OUT: &[&str] = &["resort", "check_out"];
const OUTBOUND_ARRIVAL: &[&str] = &["flights", "departing_flight", "arrival_datetime"];
const RETURN_DEPARTURE: &[&str] = &["flights", "returning_flight", "departure_datetime"];

/// The four dates that decide whether a package is consistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub outbound_arrival: NaiveDate,
    pub return_departure: NaiveDate,
}

impl StayWindow {
    /// Read the window from package `index` of a raw answer
    pub fn from_package(package: &Value, index: usize) -> Result<Self, ParseError> {
        Ok(Self {
            check_in: date_at(package, index, CHECK_IN)?,
            check_out: date_at(package, index, CHECK_OUT)?,
            outbound_arrival: date_at(package, index, OUTBOUND_ARRIVAL)?,
            return_departure: date_at(package, index, RETURN_DEPARTURE)?,
        })
    }

    fn violations(&self, index: usize) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.outbound_arrival > self.check_in {
            violations.push(Violation::package(
                index,
                ViolationKind::ArrivalAfterCheckIn,
                format!(
                    "outbound flight arrives {} after resort check-in {}",
                    self.outbound_arrival, self.check_in
                ),
            ));
        }
        if self.return_departure < self.check_out {
            violations.push(Violation::package(
                index,
                ViolationKind::DepartureBeforeCheckOut,
                format!(
                    "return flight departs {} before resort check-out {}",
                    self.return_departure, self.check_out
                ),
            ));
        }
        violations
    }
}

fn date_at(package: &Value, index: usize, keys: &[&str]) -> Result<NaiveDate, ParseError> {
    let path = || format!("results[{index}].{}", keys.join("."));
    let raw = field_at(package, index, keys)?
        .as_str()
        .ok_or_else(|| ParseError::UnexpectedShape {
            path: path(),
            expected: "ISO-8601 date string".to_string(),
        })?;
    parse_calendar_date(raw).ok_or_else(|| ParseError::InvalidDate {
        path: path(),
        value: raw.to_string(),
    })
}

/// Passes when every package's flights cover its resort stay
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConsistencyCheck;

impl DateConsistencyCheck {
    fn violations(results: &[Value]) -> Result<Vec<Violation>, ParseError> {
        let mut violations = Vec::new();
        for (index, package) in results.iter().enumerate() {
            let window = StayWindow::from_package(package, index)?;
            violations.extend(window.violations(index));
        }
        Ok(violations)
    }
}

impl Check for DateConsistencyCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::DateConsistency
    }

    fn run(&self, payload: &Value) -> CheckOutcome {
        let outcome: CheckOutcome = results_of(payload).and_then(Self::violations).into();
        debug!(
            passed = outcome.passed(),
            unparseable = outcome.is_unparseable(),
            "date consistency check"
        );
        outcome
    }
}
