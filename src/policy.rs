//! Compliance checks declared per decision type
//!
//! This is a declaration of which checks apply, not an evaluator.

use crate::models::{DecisionType, PolicyResult, PolicyStatus};

static POLICY_TABLE: &[(DecisionType, &[&str])] = &[
    (DecisionType::Allocation, &["concentration_limit", "suitability_profile"]),
    (DecisionType::Risk, &["var_limit", "drift_threshold"]),
    (DecisionType::Sentiment, &["source_allowed", "model_whitelisted"]),
];

/// Checks declared for a decision type
pub fn checks_for(decision_type: DecisionType) -> &'static [&'static str] {
    POLICY_TABLE
        .iter()
        .find(|(kind, _)| *kind == decision_type)
        .map(|(_, checks)| *checks)
        .unwrap_or(&[])
}

/// Policy result with the declared checks and the given status
pub fn policy_result(decision_type: DecisionType, status: PolicyStatus) -> PolicyResult {
    PolicyResult {
        status,
        checks: checks_for(decision_type).iter().map(|c| c.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_decision_type_has_checks() {
        for kind in [DecisionType::Allocation, DecisionType::Risk, DecisionType::Sentiment] {
            assert_eq!(checks_for(kind).len(), 2, "{} has no checks", kind);
        }
    }

    #[test]
    fn test_policy_result_serializes() {
        let result = policy_result(DecisionType::Risk, PolicyStatus::Breach);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "breach", "checks": ["var_limit", "drift_threshold"] })
        );
    }
}
