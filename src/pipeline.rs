//! Validation pipeline over one agent answer
//!
//! Runs schema, cost ordering, date consistency and result presence in that
//! order. Every check runs regardless of earlier failures so a report always
//! shows every violated property.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::checks::{
    Check, CheckKind, CheckOutcome, CostOrderingCheck, DateConsistencyCheck, MissingCostPolicy,
    ResultPresenceCheck, SchemaCheck,
};
use crate::config::ValidationConfig;
use crate::error::ParseError;
use crate::payload::parse_payload;
use crate::schema::Schema;

/// Per-check verdicts for one answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    passed: bool,
    schema: CheckOutcome,
    cost_ordering: CheckOutcome,
    date_consistency: CheckOutcome,
    result_presence: CheckOutcome,
}

impl ValidationReport {
    fn new(
        schema: CheckOutcome,
        cost_ordering: CheckOutcome,
        date_consistency: CheckOutcome,
        result_presence: CheckOutcome,
    ) -> Self {
        let passed = schema.passed()
            && cost_ordering.passed()
            && date_consistency.passed()
            && result_presence.passed();
        Self {
            passed,
            schema,
            cost_ordering,
            date_consistency,
            result_presence,
        }
    }

    fn unparseable(error: &ParseError) -> Self {
        let outcome = || CheckOutcome::from(error.clone());
        Self::new(outcome(), outcome(), outcome(), outcome())
    }

    /// `true` only when all four checks passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn schema(&self) -> &CheckOutcome {
        &self.schema
    }

    #[must_use]
    pub fn cost_ordering(&self) -> &CheckOutcome {
        &self.cost_ordering
    }

    #[must_use]
    pub fn date_consistency(&self) -> &CheckOutcome {
        &self.date_consistency
    }

    #[must_use]
    pub fn result_presence(&self) -> &CheckOutcome {
        &self.result_presence
    }

    /// Outcome of a single check
    #[must_use]
    pub fn outcome(&self, kind: CheckKind) -> &CheckOutcome {
        match kind {
            CheckKind::Schema => &self.schema,
            CheckKind::CostOrdering => &self.cost_ordering,
            CheckKind::DateConsistency => &self.date_consistency,
            CheckKind::ResultPresence => &self.result_presence,
        }
    }

    /// Outcomes in pipeline order
    #[must_use]
    pub fn outcomes(&self) -> [(CheckKind, &CheckOutcome); 4] {
        [
            (CheckKind::Schema, &self.schema),
            (CheckKind::CostOrdering, &self.cost_ordering),
            (CheckKind::DateConsistency, &self.date_consistency),
            (CheckKind::ResultPresence, &self.result_presence),
        ]
    }

    /// Checks that did not pass, including those that could not judge
    #[must_use]
    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.outcomes()
            .into_iter()
            .filter(|(_, outcome)| !outcome.passed())
            .map(|(kind, _)| kind)
            .collect()
    }
}

/// The four final-answer checks wired together
#[derive(Debug, Clone, Default)]
pub struct ValidationPipeline {
    schema: SchemaCheck,
    cost_ordering: CostOrderingCheck,
    date_consistency: DateConsistencyCheck,
    result_presence: ResultPresenceCheck,
}

impl ValidationPipeline {
    #[must_use]
    pub fn new(schema: Schema, missing_cost: MissingCostPolicy) -> Self {
        Self {
            schema: SchemaCheck::new(schema),
            cost_ordering: CostOrderingCheck::new(missing_cost),
            date_consistency: DateConsistencyCheck,
            result_presence: ResultPresenceCheck,
        }
    }

    /// Build from configuration, loading a custom schema when one is set
    pub fn from_config(config: &ValidationConfig) -> crate::Result<Self> {
        let schema = match &config.schema_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Schema::from_description_str(&text)?
            }
            None => Schema::reference().clone(),
        };
        Ok(Self::new(schema, config.missing_cost))
    }

    /// Validate an answer as produced by the agent, fence and all
    #[instrument(name = "validate_answer", skip_all, fields(bytes = answer.len()))]
    pub fn validate_str(&self, answer: &str) -> ValidationReport {
        match parse_payload(answer) {
            Ok(payload) => self.validate_value(&payload),
            Err(error) => {
                warn!(%error, "answer is not valid JSON");
                ValidationReport::unparseable(&error)
            }
        }
    }

    /// Checks in the order they run
    fn checks(&self) -> [&dyn Check; 4] {
        [
            &self.schema,
            &self.cost_ordering,
            &self.date_consistency,
            &self.result_presence,
        ]
    }

    /// Validate an already parsed answer
    pub fn validate_value(&self, payload: &Value) -> ValidationReport {
        let [schema, cost_ordering, date_consistency, result_presence] =
            self.checks().map(|check| {
                let outcome = check.run(payload);
                debug!(check = %check.kind(), passed = outcome.passed(), "check finished");
                outcome
            });
        let report =
            ValidationReport::new(schema, cost_ordering, date_consistency, result_presence);
        info!(
            passed = report.passed(),
            failed = ?report.failed_checks(),
            "validation finished"
        );
        report
    }
}
