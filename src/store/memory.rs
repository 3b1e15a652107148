//! In-memory decision store
//!
//! Buffers writes per transaction and applies them under one lock on commit.
//! Used by tests and by `STORAGE_BACKEND=memory`.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use crate::models::{
    DecisionRecordView, DecisionType, ExplanationPayload, ExplanationRef, NewDecisionLog,
    StoredDecision, StoredExplanation,
};
use super::{DecisionStore, DecisionWriter, StoreError, StoreResult};

/// Injected failure for exercising error paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Begin,
    InsertExplanation,
    InsertDecisionLog,
    Commit,
}

#[derive(Default)]
struct Tables {
    explanations: Vec<StoredExplanation>,
    decisions: Vec<StoredDecision>,
}

#[derive(Default)]
struct Shared {
    tables: RwLock<Tables>,
    next_explanation_id: AtomicI64,
    next_decision_id: AtomicI64,
    explanation_writes: AtomicUsize,
    decision_writes: AtomicUsize,
    fail_point: Mutex<Option<FailPoint>>,
}

impl Shared {
    fn check(&self, point: FailPoint) -> StoreResult<()> {
        if *self.fail_point.lock() == Some(point) {
            return Err(StoreError::Unavailable(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that fails at the given point until cleared
    pub fn failing_at(point: FailPoint) -> Self {
        let store = Self::new();
        store.set_fail_point(Some(point));
        store
    }

    pub fn set_fail_point(&self, point: Option<FailPoint>) {
        *self.shared.fail_point.lock() = point;
    }

    /// Committed explanation rows
    pub fn explanation_count(&self) -> usize {
        self.shared.tables.read().explanations.len()
    }

    /// Committed decision rows
    pub fn decision_count(&self) -> usize {
        self.shared.tables.read().decisions.len()
    }

    /// Explanation inserts attempted, committed or not
    pub fn explanation_writes(&self) -> usize {
        self.shared.explanation_writes.load(Ordering::SeqCst)
    }

    /// Decision inserts attempted, committed or not
    pub fn decision_writes(&self) -> usize {
        self.shared.decision_writes.load(Ordering::SeqCst)
    }
}

pub struct MemoryWriter {
    shared: Arc<Shared>,
    explanations: Vec<StoredExplanation>,
    decisions: Vec<StoredDecision>,
}

#[axum::async_trait]
impl DecisionStore for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn DecisionWriter>> {
        self.shared.check(FailPoint::Begin)?;
        Ok(Box::new(MemoryWriter {
            shared: Arc::clone(&self.shared),
            explanations: Vec::new(),
            decisions: Vec::new(),
        }))
    }

    async fn find_decision(&self, decision_id: &str) -> StoreResult<Option<DecisionRecordView>> {
        let tables = self.shared.tables.read();

        let Some(decision) = tables.decisions.iter().find(|d| d.decision_id == decision_id) else {
            return Ok(None);
        };

        let explanation = tables
            .explanations
            .iter()
            .find(|e| e.id == decision.explanation_id)
            .cloned()
            .ok_or(StoreError::DanglingExplanation(ExplanationRef(decision.explanation_id)))?;

        Ok(Some(DecisionRecordView { decision: decision.clone(), explanation }))
    }
}

#[axum::async_trait]
impl DecisionWriter for MemoryWriter {
    async fn insert_explanation(
        &mut self,
        decision_type: DecisionType,
        decision_id: &str,
        payload: &ExplanationPayload,
    ) -> StoreResult<ExplanationRef> {
        self.shared.explanation_writes.fetch_add(1, Ordering::SeqCst);
        self.shared.check(FailPoint::InsertExplanation)?;

        let id = self.shared.next_explanation_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.explanations.push(StoredExplanation {
            id,
            decision_type: decision_type.as_str().to_string(),
            decision_id: decision_id.to_string(),
            model_name: payload.model_name.clone(),
            model_version: payload.model_version.clone(),
            feature_attributions: serde_json::to_value(&payload.feature_attributions)?,
            shap_summary: serde_json::to_value(&payload.shap_summary)?,
            explanation_text: payload.explanation_text.clone(),
            created_at: Utc::now(),
        });

        Ok(ExplanationRef(id))
    }

    async fn insert_decision_log(&mut self, log: &NewDecisionLog) -> StoreResult<()> {
        self.shared.decision_writes.fetch_add(1, Ordering::SeqCst);
        self.shared.check(FailPoint::InsertDecisionLog)?;

        let id = self.shared.next_decision_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.decisions.push(StoredDecision {
            id,
            decision_type: log.decision_type.as_str().to_string(),
            decision_id: log.decision_id.clone(),
            account_id: log.account_id.clone(),
            ticker: log.ticker.clone(),
            input_payload: log.input_payload.clone(),
            output_payload: log.output_payload.clone(),
            explanation_id: log.explanation_ref.0,
            policy_result: serde_json::to_value(&log.policy_result)?,
            created_at: Utc::now(),
        });

        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.shared.check(FailPoint::Commit)?;

        let MemoryWriter { shared, explanations, decisions } = *self;
        let mut tables = shared.tables.write();

        // Same guarantees as the foreign key and unique constraint in Postgres
        for decision in &decisions {
            let resolvable = explanations.iter().chain(tables.explanations.iter())
                .any(|e| e.id == decision.explanation_id);
            if !resolvable {
                return Err(StoreError::DanglingExplanation(ExplanationRef(decision.explanation_id)));
            }
            if tables.decisions.iter().any(|d| d.decision_id == decision.decision_id) {
                return Err(StoreError::Unavailable(format!(
                    "duplicate decision id {}", decision.decision_id
                )));
            }
        }

        tables.explanations.extend(explanations);
        tables.decisions.extend(decisions);
        Ok(())
    }
}
