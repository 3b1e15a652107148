//! Decision recorder
//!
//! Persists an explanation and then the decision that references it, inside
//! one store transaction. A decision is never written without a resolvable
//! explanation; any failure aborts the whole pair and reaches the caller.

use std::sync::Arc;

use crate::models::{DecisionType, ExplanationPayload, ExplanationRef, NewDecisionLog, PolicyResult};
use crate::store::{DecisionStore, StoreResult};

/// Everything needed to record one decision
#[derive(Debug, Clone)]
pub struct DecisionEntry<'a> {
    pub decision_type: DecisionType,
    pub decision_id: &'a str,
    pub explanation: &'a ExplanationPayload,
    pub input_payload: serde_json::Value,
    pub output_payload: serde_json::Value,
    pub policy_result: PolicyResult,
    pub account_id: Option<String>,
    pub ticker: Option<String>,
}

#[derive(Clone)]
pub struct DecisionRecorder {
    store: Arc<dyn DecisionStore>,
}

impl DecisionRecorder {
    pub fn new(store: Arc<dyn DecisionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DecisionStore> {
        &self.store
    }

    /// Record explanation then decision; returns the explanation reference once committed.
    pub async fn record(&self, entry: DecisionEntry<'_>) -> StoreResult<ExplanationRef> {
        let mut writer = self.store.begin().await?;

        let explanation_ref = writer
            .insert_explanation(entry.decision_type, entry.decision_id, entry.explanation)
            .await
            .inspect_err(|e| tracing::error!(decision_id = entry.decision_id, "explanation write failed: {}", e))?;

        let log = NewDecisionLog {
            decision_type: entry.decision_type,
            decision_id: entry.decision_id.to_string(),
            account_id: entry.account_id,
            ticker: entry.ticker,
            input_payload: entry.input_payload,
            output_payload: entry.output_payload,
            explanation_ref,
            policy_result: entry.policy_result,
        };

        writer
            .insert_decision_log(&log)
            .await
            .inspect_err(|e| tracing::error!(decision_id = entry.decision_id, "decision write failed: {}", e))?;

        writer.commit().await?;

        tracing::info!(
            decision_type = %entry.decision_type,
            decision_id = entry.decision_id,
            explanation_ref = explanation_ref.0,
            "decision recorded"
        );

        Ok(explanation_ref)
    }
}
