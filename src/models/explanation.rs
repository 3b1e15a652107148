//! Explanation model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

use super::{AttributionSummary, FeatureMap};

/// Identity of the scoring model behind a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCard {
    /// Display name used in explanation text
    pub agent_name: &'static str,
    pub model_name: &'static str,
    pub model_version: &'static str,
}

/// Explanation attached to exactly one decision. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationPayload {
    pub model_name: String,
    pub model_version: String,
    /// Raw features as computed by the model
    pub feature_attributions: FeatureMap,
    /// Normalized attribution-seed weights
    pub shap_summary: AttributionSummary,
    pub explanation_text: String,
}

/// Reference to a persisted explanation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplanationRef(pub i64);

impl std::fmt::Display for ExplanationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explanation as read back from storage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredExplanation {
    pub id: i64,
    pub decision_type: String,
    pub decision_id: String,
    pub model_name: String,
    pub model_version: String,
    pub feature_attributions: serde_json::Value,
    pub shap_summary: serde_json::Value,
    pub explanation_text: String,
    pub created_at: DateTime<Utc>,
}
