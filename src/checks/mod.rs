//! Final-answer checks for trip packages
//!
//! Each check judges one property of a parsed answer:
//! - Schema: structural conformance to the output schema
//! - Cost ordering: packages ascending by `total_package_cost`
//! - Date consistency: flights bracket the resort stay
//! - Result presence: at least one package
//!
//! Checks never panic and never give up silently. A payload they cannot judge
//! is reported as [`CheckOutcome::Unparseable`], which is distinct from a
//! payload they judged and rejected.

pub mod dates;
pub mod ordering;
pub mod presence;
pub mod schema;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;

pub use dates::DateConsistencyCheck;
pub use ordering::{CostOrderingCheck, MissingCostPolicy};
pub use presence::ResultPresenceCheck;
pub use schema::SchemaCheck;

/// Which property a check verifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Schema,
    CostOrdering,
    DateConsistency,
    ResultPresence,
}

impl CheckKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Schema => "schema-valid",
            CheckKind::CostOrdering => "sorted-by-cost",
            CheckKind::DateConsistency => "dates-consistent",
            CheckKind::ResultPresence => "has-results",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What went wrong in a judged payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    SchemaViolation,
    OrderingViolation,
    /// Package without `total_package_cost` under [`MissingCostPolicy::Require`]
    MissingCost,
    ArrivalAfterCheckIn,
    DepartureBeforeCheckOut,
    EmptyResult,
}

/// A single rule violation, tied to a package when there is one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Position in `results`, `None` for set-level violations
    pub index: Option<usize>,
    pub kind: ViolationKind,
    pub detail: String,
}

impl Violation {
    pub fn package(index: usize, kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            kind,
            detail: detail.into(),
        }
    }

    pub fn set_level(kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            index: None,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "package {index}: {}", self.detail),
            None => f.write_str(&self.detail),
        }
    }
}

/// Result of running one check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed { violations: Vec<Violation> },
    /// The payload could not be judged
    Unparseable { error: ParseError },
}

impl CheckOutcome {
    /// Passed when there are no violations
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed { violations }
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }

    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        matches!(self, CheckOutcome::Unparseable { .. })
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            CheckOutcome::Failed { violations } => violations,
            _ => &[],
        }
    }
}

impl From<ParseError> for CheckOutcome {
    fn from(error: ParseError) -> Self {
        CheckOutcome::Unparseable { error }
    }
}

impl From<Result<Vec<Violation>, ParseError>> for CheckOutcome {
    fn from(result: Result<Vec<Violation>, ParseError>) -> Self {
        match result {
            Ok(violations) => CheckOutcome::from_violations(violations),
            Err(error) => error.into(),
        }
    }
}

/// A pure judgement over a parsed answer
pub trait Check: Send + Sync {
    fn kind(&self) -> CheckKind;

    fn run(&self, payload: &Value) -> CheckOutcome;
}

/// The `results` array of an answer
///
/// A missing `results` key counts as empty. A root that is not an object, or
/// a `results` value that is not an array, cannot be judged.
pub(crate) fn results_of(payload: &Value) -> Result<&[Value], ParseError> {
    let root = payload.as_object().ok_or_else(|| ParseError::UnexpectedShape {
        path: "$".to_string(),
        expected: "object".to_string(),
    })?;

    match root.get("results") {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ParseError::UnexpectedShape {
            path: "results".to_string(),
            expected: "array".to_string(),
        }),
    }
}

/// Follow `keys` from a package, returning the field or why it is unreachable
pub(crate) fn field_at<'a>(
    package: &'a Value,
    index: usize,
    keys: &[&str],
) -> Result<&'a Value, ParseError> {
    let mut current = package;
    let mut path = format!("results[{index}]");
    for key in keys {
        let object = current.as_object().ok_or_else(|| ParseError::UnexpectedShape {
            path: path.clone(),
            expected: "object".to_string(),
        })?;
        path.push('.');
        path.push_str(key);
        current = object
            .get(*key)
            .ok_or_else(|| ParseError::MissingField(path.clone()))?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_from_violations() {
        assert!(CheckOutcome::from_violations(vec![]).passed());

        let failed = CheckOutcome::from_violations(vec![Violation::set_level(
            ViolationKind::EmptyResult,
            "no packages",
        )]);
        assert!(!failed.passed());
        assert!(!failed.is_unparseable());
        assert_eq!(failed.violations().len(), 1);
    }

    #[test]
    fn test_unparseable_is_not_passed() {
        let outcome: CheckOutcome = ParseError::Json("eof".to_string()).into();
        assert!(!outcome.passed());
        assert!(outcome.is_unparseable());
        assert!(outcome.violations().is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = CheckOutcome::from_violations(vec![Violation::package(
            2,
            ViolationKind::ArrivalAfterCheckIn,
            "late",
        )]);
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "failed",
                "violations": [{"index": 2, "kind": "arrival_after_check_in", "detail": "late"}]
            })
        );

        let value = serde_json::to_value(CheckOutcome::Passed).unwrap();
        assert_eq!(value, json!({"status": "passed"}));
    }

    #[test]
    fn test_results_of() {
        assert!(results_of(&json!({})).unwrap().is_empty());
        assert_eq!(results_of(&json!({"results": [1, 2]})).unwrap().len(), 2);
        assert!(matches!(
            results_of(&json!({"results": {}})),
            Err(ParseError::UnexpectedShape { .. })
        ));
        assert!(results_of(&json!("text")).is_err());
    }

    #[test]
    fn test_field_at_paths() {
        let package = json!({"resort": {"check_in": "2026-06-10"}, "flights": 3});
        assert_eq!(
            field_at(&package, 0, &["resort", "check_in"]).unwrap(),
            &json!("2026-06-10")
        );
        assert_eq!(
            field_at(&package, 4, &["resort", "check_out"]).unwrap_err(),
            ParseError::MissingField("results[4].resort.check_out".to_string())
        );
        assert_eq!(
            field_at(&package, 1, &["flights", "departing_flight"]).unwrap_err(),
            ParseError::UnexpectedShape {
                path: "results[1].flights".to_string(),
                expected: "object".to_string(),
            }
        );
    }
}
