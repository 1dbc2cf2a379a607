//! Packages must be listed cheapest first

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Check, CheckKind, CheckOutcome, Violation, ViolationKind, results_of};
use crate::error::ParseError;

const COST_FIELD: &str = "total_package_cost";

/// How to treat a package that has no `total_package_cost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCostPolicy {
    /// Leave the package out of the ordering comparison
    #[default]
    Skip,
    /// Report the package as a violation
    Require,
}

/// Passes when package costs are non-decreasing in list order
#[derive(Debug, Clone, Copy, Default)]
pub struct CostOrderingCheck {
    missing_cost: MissingCostPolicy,
}

impl CostOrderingCheck {
    #[must_use]
    pub fn new(missing_cost: MissingCostPolicy) -> Self {
        Self { missing_cost }
    }

    fn violations(&self, results: &[Value]) -> Result<Vec<Violation>, ParseError> {
        let mut violations = Vec::new();
        let mut previous: Option<(usize, f64)> = None;

        for (index, package) in results.iter().enumerate() {
            let package = package.as_object().ok_or_else(|| ParseError::UnexpectedShape {
                path: format!("results[{index}]"),
                expected: "object".to_string(),
            })?;

            let Some(cost) = package.get(COST_FIELD) else {
                if self.missing_cost == MissingCostPolicy::Require {
                    violations.push(Violation::package(
                        index,
                        ViolationKind::MissingCost,
                        format!("{COST_FIELD} is missing"),
                    ));
                }
                continue;
            };

            let cost = cost.as_f64().ok_or_else(|| ParseError::UnexpectedShape {
                path: format!("results[{index}].{COST_FIELD}"),
                expected: "number".to_string(),
            })?;

            if let Some((previous_index, previous_cost)) = previous
                && cost < previous_cost
            {
                let detail = format!(
                    "{COST_FIELD} {cost} is lower than {previous_cost} of package {previous_index}"
                );
                violations.push(Violation::package(
                    index,
                    ViolationKind::OrderingViolation,
                    detail,
                ));
            }
            previous = Some((index, cost));
        }

        Ok(violations)
    }
}

impl Check for CostOrderingCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::CostOrdering
    }

    fn run(&self, payload: &Value) -> CheckOutcome {
        let outcome: CheckOutcome = results_of(payload)
            .and_then(|results| self.violations(results))
            .into();
        debug!(policy = ?self.missing_cost, passed = outcome.passed(), "cost ordering check");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn payload(costs: &[Option<f64>]) -> Value {
        let results: Vec<Value> = costs
            .iter()
            .map(|cost| match cost {
                Some(cost) => json!({"total_package_cost": cost}),
                None => json!({"currency": "USD"}),
            })
            .collect();
        json!({ "results": results })
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[Some(1200.0)], true)]
    #[case(&[Some(1200.0), Some(1500.0)], true)]
    #[case(&[Some(1200.0), Some(1200.0), Some(1500.0)], true)]
    #[case(&[Some(1500.0), Some(1200.0)], false)]
    #[case(&[Some(1200.0), Some(1500.0), Some(1300.0)], false)]
    #[case(&[Some(1200.0), None, Some(1500.0)], true)]
    #[case(&[None, None], true)]
    #[case(&[Some(1500.0), None, Some(1200.0)], false)]
    fn test_ordering_with_skip_policy(#[case] costs: &[Option<f64>], #[case] expected: bool) {
        let outcome = CostOrderingCheck::default().run(&payload(costs));
        assert_eq!(outcome.passed(), expected);
    }

    #[test]
    fn test_descending_pair_reports_later_package() {
        let outcome = CostOrderingCheck::default().run(&json!({
            "results": [{"total_package_cost": 1500}, {"total_package_cost": 1200}]
        }));
        let violations = outcome.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].index, Some(1));
        assert_eq!(violations[0].kind, ViolationKind::OrderingViolation);
        assert!(violations[0].detail.contains("lower than 1500"));
    }

    #[test]
    fn test_comparison_skips_over_missing_costs() {
        let outcome = CostOrderingCheck::default().run(&payload(&[
            Some(1500.0),
            None,
            Some(1200.0),
        ]));
        let violations = outcome.violations();
        assert_eq!(violations[0].index, Some(2));
        assert!(violations[0].detail.contains("package 0"));
    }

    #[test]
    fn test_require_policy_reports_missing_cost() {
        let check = CostOrderingCheck::new(MissingCostPolicy::Require);
        let outcome = check.run(&payload(&[Some(1200.0), None, Some(1500.0)]));
        let violations = outcome.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].index, Some(1));
        assert_eq!(violations[0].kind, ViolationKind::MissingCost);
    }

    #[test]
    fn test_integer_and_float_costs_compare() {
        let outcome = CostOrderingCheck::default().run(&json!({
            "results": [{"total_package_cost": 1200}, {"total_package_cost": 1200.5}]
        }));
        assert!(outcome.passed());
    }

    #[rstest]
    #[case(json!({"results": [{"total_package_cost": "1200"}]}))]
    #[case(json!({"results": [{"total_package_cost": null}]}))]
    #[case(json!({"results": ["package"]}))]
    #[case(json!({"results": 3}))]
    fn test_unjudgeable_costs(#[case] payload: Value) {
        assert!(CostOrderingCheck::default().run(&payload).is_unparseable());
    }

    #[test]
    fn test_policy_deserializes_from_config_names() {
        let policy: MissingCostPolicy = serde_json::from_str("\"require\"").unwrap();
        assert_eq!(policy, MissingCostPolicy::Require);
        let policy: MissingCostPolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, MissingCostPolicy::Skip);
    }
}
