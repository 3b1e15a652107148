//! Two-tower allocation model

use crate::models::{AllocationRequest, FeatureMap};
use super::Scored;

/// Penalty per unit of unused risk budget
const RISK_PENALTY_RATE: f64 = 0.35;

/// Logit clamp before the logistic function
const LOGIT_BOUND: f64 = 20.0;

/// Single-position cap on target weight
const MAX_TARGET_WEIGHT: f64 = 0.25;

/// Share of the risk budget credited in the attribution seed
const RISK_BUDGET_ATTRIBUTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationScore {
    pub affinity: f64,
    pub risk_penalty: f64,
    pub logit: f64,
    /// Logistic score in (0, 1)
    pub score: f64,
    /// Suggested position weight in [0, 0.25]
    pub target_weight: f64,
}

/// Inner product over the common prefix of both towers
pub fn dot(user: &[f64], asset: &[f64]) -> f64 {
    user.iter().zip(asset).map(|(u, a)| u * a).sum()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn score(req: &AllocationRequest) -> Scored<AllocationScore> {
    let affinity = dot(&req.tower_user_embedding, &req.tower_asset_embedding);
    let risk_penalty = (1.0 - req.risk_budget) * RISK_PENALTY_RATE;
    let logit = affinity - risk_penalty;
    let score = sigmoid(logit.clamp(-LOGIT_BOUND, LOGIT_BOUND));
    let target_weight = (score * req.risk_budget).clamp(0.0, MAX_TARGET_WEIGHT);

    tracing::debug!(affinity, risk_penalty, logit, score, target_weight, "allocation scored");

    let raw_features = FeatureMap::new()
        .with("tower_affinity", affinity)
        .with("risk_budget", req.risk_budget)
        .with("risk_penalty", risk_penalty);

    let attribution_seed = FeatureMap::new()
        .with("tower_affinity", affinity)
        .with("risk_budget", req.risk_budget * RISK_BUDGET_ATTRIBUTION)
        .with("risk_penalty", -risk_penalty);

    Scored {
        score: AllocationScore { affinity, risk_penalty, logit, score, target_weight },
        raw_features,
        attribution_seed,
    }
}
