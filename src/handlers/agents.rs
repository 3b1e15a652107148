//! Agent handlers

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::agents::{self, AgentResponse, AllocationAgent, RiskAgent, SentimentAgent};
use crate::models::{AllocationRequest, RiskRequest, SentimentRequest};
use super::extract::AppJson;

/// Run portfolio allocation agent
pub async fn run_allocation(
    State(state): State<AppState>,
    AppJson(req): AppJson<AllocationRequest>,
) -> AppResult<Json<AgentResponse<AllocationAgent>>> {
    let response = agents::run::<AllocationAgent>(&state.recorder, req).await?;
    Ok(Json(response))
}

/// Run risk agent
pub async fn run_risk(
    State(state): State<AppState>,
    AppJson(req): AppJson<RiskRequest>,
) -> AppResult<Json<AgentResponse<RiskAgent>>> {
    let response = agents::run::<RiskAgent>(&state.recorder, req).await?;
    Ok(Json(response))
}

/// Run sentiment agent
pub async fn run_sentiment(
    State(state): State<AppState>,
    AppJson(req): AppJson<SentimentRequest>,
) -> AppResult<Json<AgentResponse<SentimentAgent>>> {
    let response = agents::run::<SentimentAgent>(&state.recorder, req).await?;
    Ok(Json(response))
}
