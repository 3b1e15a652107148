//! News and filing sentiment agent

use chrono::{DateTime, Utc};

use crate::models::{round_to, DecisionType, ModelCard, PolicyStatus, SentimentOutput, SentimentRequest};
use crate::scoring::sentiment;
use super::{Agent, Decision, MODEL_VERSION};

pub struct SentimentAgent;

impl Agent for SentimentAgent {
    type Request = SentimentRequest;
    type Output = SentimentOutput;

    const DECISION_TYPE: DecisionType = DecisionType::Sentiment;
    const DOMAIN_KEY: &'static str = "signal";
    const MODEL: ModelCard = ModelCard {
        agent_name: "Sentiment Agent",
        model_name: "finbert-lite",
        model_version: MODEL_VERSION,
    };

    fn decide(req: &SentimentRequest, decision_id: &str, now: DateTime<Utc>) -> Decision<SentimentOutput> {
        let scored = sentiment::score(req);

        Decision {
            output: SentimentOutput {
                decision_id: decision_id.to_string(),
                ticker: req.ticker.clone(),
                sentiment_score: round_to(scored.score.score, 4),
                confidence: round_to(scored.score.confidence, 4),
                timestamp: now,
            },
            raw_features: scored.raw_features,
            attribution_seed: scored.attribution_seed,
            policy_status: PolicyStatus::Pass,
            account_id: None,
            ticker: Some(req.ticker.clone()),
        }
    }

    fn numeric_fields(output: &SentimentOutput) -> Vec<(&'static str, f64)> {
        vec![
            ("sentiment_score", output.sentiment_score),
            ("confidence", output.confidence),
        ]
    }
}
