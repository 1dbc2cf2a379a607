//! Structural conformance of an answer

use serde_json::Value;
use tracing::debug;

use super::{Check, CheckKind, CheckOutcome, Violation, ViolationKind};
use crate::schema::Schema;

/// Checks an answer against a [`Schema`]
///
/// Every mismatch becomes one violation; mismatches inside `results[i]` are
/// attributed to package `i`.
#[derive(Debug, Clone)]
pub struct SchemaCheck {
    schema: Schema,
}

impl SchemaCheck {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for SchemaCheck {
    fn default() -> Self {
        Self::new(Schema::reference().clone())
    }
}

impl Check for SchemaCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Schema
    }

    fn run(&self, payload: &Value) -> CheckOutcome {
        let violations: Vec<Violation> = self
            .schema
            .validate(payload)
            .into_iter()
            .map(|mismatch| Violation {
                index: mismatch.path.package_index(),
                kind: ViolationKind::SchemaViolation,
                detail: mismatch.to_string(),
            })
            .collect();
        debug!(violations = violations.len(), "schema check finished");
        CheckOutcome::from_violations(violations)
    }
}
