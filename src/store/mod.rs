//! Decision store
//!
//! Write interface consumed by the decision recorder. A store hands out a
//! transaction-scoped writer; nothing written through it is visible to other
//! readers until `commit`, and dropping it uncommitted discards the writes.

pub mod memory;
pub mod postgres;

pub use memory::{FailPoint, MemoryStore};
pub use postgres::PgStore;

use crate::models::{
    DecisionRecordView, DecisionType, ExplanationPayload, ExplanationRef, NewDecisionLog,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("explanation {0} does not exist")]
    DanglingExplanation(ExplanationRef),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[axum::async_trait]
pub trait DecisionStore: Send + Sync {
    /// Open a transaction scope for one decision
    async fn begin(&self) -> StoreResult<Box<dyn DecisionWriter>>;

    /// Committed decision with its explanation, if any
    async fn find_decision(&self, decision_id: &str) -> StoreResult<Option<DecisionRecordView>>;
}

#[axum::async_trait]
pub trait DecisionWriter: Send {
    async fn insert_explanation(
        &mut self,
        decision_type: DecisionType,
        decision_id: &str,
        payload: &ExplanationPayload,
    ) -> StoreResult<ExplanationRef>;

    async fn insert_decision_log(&mut self, log: &NewDecisionLog) -> StoreResult<()>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
