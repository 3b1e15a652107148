//! Decision log model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

use super::{ExplanationRef, StoredExplanation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    Allocation,
    Risk,
    Sentiment,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Allocation => "allocation",
            DecisionType::Risk => "risk",
            DecisionType::Sentiment => "sentiment",
        }
    }

    /// Decision id prefix for the agent family
    pub fn id_prefix(&self) -> &'static str {
        match self {
            DecisionType::Allocation => "alloc",
            DecisionType::Risk => "risk",
            DecisionType::Sentiment => "sent",
        }
    }

    /// Generate a fresh `<prefix>-<uuid>` decision id
    pub fn new_decision_id(&self) -> String {
        format!("{}-{}", self.id_prefix(), uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for DecisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Pass,
    Breach,
}

/// Static compliance declaration attached to a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub status: PolicyStatus,
    pub checks: Vec<String>,
}

/// Decision row to be written after its explanation
#[derive(Debug, Clone)]
pub struct NewDecisionLog {
    pub decision_type: DecisionType,
    pub decision_id: String,
    pub account_id: Option<String>,
    pub ticker: Option<String>,
    pub input_payload: serde_json::Value,
    pub output_payload: serde_json::Value,
    pub explanation_ref: ExplanationRef,
    pub policy_result: PolicyResult,
}

/// Decision row as read back from storage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredDecision {
    pub id: i64,
    pub decision_type: String,
    pub decision_id: String,
    pub account_id: Option<String>,
    pub ticker: Option<String>,
    pub input_payload: serde_json::Value,
    pub output_payload: serde_json::Value,
    pub explanation_id: i64,
    pub policy_result: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A committed decision together with its resolved explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecordView {
    pub decision: StoredDecision,
    pub explanation: StoredExplanation,
}
