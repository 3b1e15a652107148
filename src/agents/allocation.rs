//! Portfolio allocation agent

use chrono::{DateTime, Utc};

use crate::models::{round_to, AllocationOutput, AllocationRequest, DecisionType, ModelCard, PolicyStatus};
use crate::scoring::allocation;
use super::{Agent, Decision, MODEL_VERSION};

pub struct AllocationAgent;

impl Agent for AllocationAgent {
    type Request = AllocationRequest;
    type Output = AllocationOutput;

    const DECISION_TYPE: DecisionType = DecisionType::Allocation;
    const DOMAIN_KEY: &'static str = "allocation";
    const MODEL: ModelCard = ModelCard {
        agent_name: "Portfolio Agent",
        model_name: "two-tower-allocator",
        model_version: MODEL_VERSION,
    };

    fn decide(req: &AllocationRequest, decision_id: &str, now: DateTime<Utc>) -> Decision<AllocationOutput> {
        let scored = allocation::score(req);

        Decision {
            output: AllocationOutput {
                decision_id: decision_id.to_string(),
                account_id: req.account_id.clone(),
                ticker: req.ticker.clone(),
                allocation_score: round_to(scored.score.score, 4),
                target_weight: round_to(scored.score.target_weight, 4),
                timestamp: now,
            },
            raw_features: scored.raw_features,
            attribution_seed: scored.attribution_seed,
            policy_status: PolicyStatus::Pass,
            account_id: Some(req.account_id.clone()),
            ticker: Some(req.ticker.clone()),
        }
    }

    fn numeric_fields(output: &AllocationOutput) -> Vec<(&'static str, f64)> {
        vec![
            ("allocation_score", output.allocation_score),
            ("target_weight", output.target_weight),
        ]
    }
}
