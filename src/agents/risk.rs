//! Risk monitoring agent

use chrono::{DateTime, Utc};

use crate::models::{round_to, DecisionType, ModelCard, PolicyStatus, RiskOutput, RiskRequest};
use crate::scoring::risk;
use super::{Agent, Decision, MODEL_VERSION};

pub struct RiskAgent;

impl Agent for RiskAgent {
    type Request = RiskRequest;
    type Output = RiskOutput;

    const DECISION_TYPE: DecisionType = DecisionType::Risk;
    const DOMAIN_KEY: &'static str = "risk";
    const MODEL: ModelCard = ModelCard {
        agent_name: "Risk Agent",
        model_name: "historical-var-monitor",
        model_version: MODEL_VERSION,
    };

    fn decide(req: &RiskRequest, decision_id: &str, now: DateTime<Utc>) -> Decision<RiskOutput> {
        let scored = risk::score(req);
        let breach = scored.score.breach;

        Decision {
            output: RiskOutput {
                decision_id: decision_id.to_string(),
                account_id: req.account_id.clone(),
                var_95: round_to(scored.score.var95, 6),
                var_99: round_to(scored.score.var99, 6),
                drift_score: round_to(scored.score.drift_score, 6),
                breach_flag: breach,
                timestamp: now,
            },
            raw_features: scored.raw_features,
            attribution_seed: scored.attribution_seed,
            policy_status: if breach { PolicyStatus::Breach } else { PolicyStatus::Pass },
            account_id: Some(req.account_id.clone()),
            ticker: None,
        }
    }

    fn numeric_fields(output: &RiskOutput) -> Vec<(&'static str, f64)> {
        vec![
            ("var_95", output.var_95),
            ("var_99", output.var_99),
            ("drift_score", output.drift_score),
        ]
    }
}
