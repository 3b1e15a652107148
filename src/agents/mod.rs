//! Agent runner
//!
//! One request, one decision: check the input contract, score, explain,
//! record, respond. Agents hold no state between requests.

pub mod allocation;
pub mod risk;
pub mod sentiment;

pub use allocation::AllocationAgent;
pub use risk::RiskAgent;
pub use sentiment::SentimentAgent;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use validator::Validate;

use crate::explain;
use crate::models::{DecisionType, ExplanationPayload, ExplanationRef, FeatureMap, ModelCard, PolicyStatus};
use crate::policy;
use crate::recorder::{DecisionEntry, DecisionRecorder};
use crate::{AppError, AppResult};

/// Model version shared by all agents
pub const MODEL_VERSION: &str = "2026.02";

/// Scored decision before it is explained and recorded
#[derive(Debug, Clone)]
pub struct Decision<O> {
    pub output: O,
    pub raw_features: FeatureMap,
    pub attribution_seed: FeatureMap,
    pub policy_status: PolicyStatus,
    pub account_id: Option<String>,
    pub ticker: Option<String>,
}

pub trait Agent {
    type Request: Validate + Serialize + Send + Sync + 'static;
    type Output: Serialize + Send + Sync + 'static;

    const DECISION_TYPE: DecisionType;
    /// Response key for the output payload
    const DOMAIN_KEY: &'static str;
    const MODEL: ModelCard;

    /// Score a validated request and shape its output payload
    fn decide(req: &Self::Request, decision_id: &str, now: DateTime<Utc>) -> Decision<Self::Output>;

    /// Numeric fields of the output payload
    fn numeric_fields(output: &Self::Output) -> Vec<(&'static str, f64)>;
}

/// `{<domain_key>: output, explainability: payload}`
pub struct AgentResponse<A: Agent> {
    pub output: A::Output,
    pub explainability: ExplanationPayload,
    pub explanation_ref: ExplanationRef,
}

impl<A: Agent> Serialize for AgentResponse<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(A::DOMAIN_KEY, &self.output)?;
        map.serialize_entry("explainability", &self.explainability)?;
        map.end()
    }
}

/// Input contract check, before any scoring
pub fn check_request<A: Agent>(req: &A::Request) -> AppResult<()> {
    req.validate().map_err(|errors| {
        let err = AppError::from(errors);
        tracing::warn!(decision_type = %A::DECISION_TYPE, "request rejected: {}", err);
        err
    })
}

/// Reject a decision whose numbers overflowed during scoring.
///
/// Finite but extreme inputs can still produce NaN or infinities, which JSON
/// cannot carry; nothing is recorded for such a decision.
pub fn ensure_finite<A: Agent>(decision: &Decision<A::Output>) -> AppResult<()> {
    let output_fields: Vec<(&str, f64)> = A::numeric_fields(&decision.output);
    let non_finite = decision.raw_features.iter()
        .chain(decision.attribution_seed.iter())
        .chain(output_fields)
        .find(|(_, value)| !value.is_finite());

    match non_finite {
        Some((name, value)) => {
            tracing::warn!(decision_type = %A::DECISION_TYPE, field = name, "non-finite result: {}", value);
            Err(AppError::Validation(format!(
                "input out of computable range: {} is {}", name, value
            )))
        }
        None => Ok(()),
    }
}

/// Run one request through an agent
pub async fn run<A: Agent>(recorder: &DecisionRecorder, req: A::Request) -> AppResult<AgentResponse<A>> {
    check_request::<A>(&req)?;

    let decision_id = A::DECISION_TYPE.new_decision_id();
    let decision = A::decide(&req, &decision_id, Utc::now());
    ensure_finite::<A>(&decision)?;

    let explainability = explain::build_payload(&A::MODEL, decision.raw_features, &decision.attribution_seed);
    let input_payload = serde_json::to_value(&req)?;
    let output_payload = serde_json::to_value(&decision.output)?;

    let explanation_ref = recorder
        .record(DecisionEntry {
            decision_type: A::DECISION_TYPE,
            decision_id: &decision_id,
            explanation: &explainability,
            input_payload,
            output_payload,
            policy_result: policy::policy_result(A::DECISION_TYPE, decision.policy_status),
            account_id: decision.account_id,
            ticker: decision.ticker,
        })
        .await?;

    Ok(AgentResponse {
        output: decision.output,
        explainability,
        explanation_ref,
    })
}
