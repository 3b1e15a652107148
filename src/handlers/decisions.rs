//! Decision audit handlers

use axum::{extract::{State, Path}, Json};

use crate::{AppState, AppResult, AppError};
use crate::models::DecisionRecordView;

/// Get a committed decision with its explanation
pub async fn get(
    State(state): State<AppState>,
    Path(decision_id): Path<String>,
) -> AppResult<Json<DecisionRecordView>> {
    let view = state.recorder.store()
        .find_decision(&decision_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Decision not found".to_string()))?;

    Ok(Json(view))
}
