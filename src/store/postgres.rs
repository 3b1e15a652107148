//! PostgreSQL decision store

use sqlx::{PgPool, Postgres, Transaction};

use crate::models::{
    DecisionRecordView, DecisionType, ExplanationPayload, ExplanationRef, NewDecisionLog,
    StoredDecision, StoredExplanation,
};
use super::{DecisionStore, DecisionWriter, StoreResult};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Writer bound to one open transaction
pub struct PgWriter {
    tx: Transaction<'static, Postgres>,
}

#[axum::async_trait]
impl DecisionStore for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn DecisionWriter>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgWriter { tx }))
    }

    async fn find_decision(&self, decision_id: &str) -> StoreResult<Option<DecisionRecordView>> {
        let decision = sqlx::query_as::<_, StoredDecision>(
            "SELECT * FROM decision_logs WHERE decision_id = $1"
        )
        .bind(decision_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(decision) = decision else {
            return Ok(None);
        };

        let explanation = sqlx::query_as::<_, StoredExplanation>(
            "SELECT * FROM explanations WHERE id = $1"
        )
        .bind(decision.explanation_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(super::StoreError::DanglingExplanation(ExplanationRef(decision.explanation_id)))?;

        Ok(Some(DecisionRecordView { decision, explanation }))
    }
}

#[axum::async_trait]
impl DecisionWriter for PgWriter {
    async fn insert_explanation(
        &mut self,
        decision_type: DecisionType,
        decision_id: &str,
        payload: &ExplanationPayload,
    ) -> StoreResult<ExplanationRef> {
        let attributions = serde_json::to_value(&payload.feature_attributions)?;
        let summary = serde_json::to_value(&payload.shap_summary)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO explanations (decision_type, decision_id, model_name, model_version, feature_attributions, shap_summary, explanation_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#
        )
        .bind(decision_type.as_str())
        .bind(decision_id)
        .bind(&payload.model_name)
        .bind(&payload.model_version)
        .bind(&attributions)
        .bind(&summary)
        .bind(&payload.explanation_text)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(ExplanationRef(id))
    }

    async fn insert_decision_log(&mut self, log: &NewDecisionLog) -> StoreResult<()> {
        let policy = serde_json::to_value(&log.policy_result)?;

        sqlx::query(
            r#"
            INSERT INTO decision_logs (decision_type, decision_id, account_id, ticker, input_payload, output_payload, explanation_id, policy_result)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#
        )
        .bind(log.decision_type.as_str())
        .bind(&log.decision_id)
        .bind(&log.account_id)
        .bind(&log.ticker)
        .bind(&log.input_payload)
        .bind(&log.output_payload)
        .bind(log.explanation_ref.0)
        .bind(&policy)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
