//! At least one package must be offered

use serde_json::Value;
use tracing::debug;

use super::{Check, CheckKind, CheckOutcome, Violation, ViolationKind, results_of};

/// Passes when `results` holds one or more packages
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultPresenceCheck;

impl Check for ResultPresenceCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::ResultPresence
    }

    fn run(&self, payload: &Value) -> CheckOutcome {
        let results = match results_of(payload) {
            Ok(results) => results,
            Err(error) => return error.into(),
        };
        debug!(packages = results.len(), "result presence check");

        if results.is_empty() {
            CheckOutcome::from_violations(vec![Violation::set_level(
                ViolationKind::EmptyResult,
                "no travel packages in results",
            )])
        } else {
            CheckOutcome::Passed
        }
    }
}
