//! Allocation request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;
use chrono::{DateTime, Utc};

use super::{all_finite, finite};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AllocationRequest {
    #[validate(length(min = 1, max = 255))]
    pub account_id: String,
    #[validate(length(min = 1, max = 32))]
    pub ticker: String,
    #[validate(length(min = 8, max = 512), custom(function = "all_finite"))]
    pub tower_user_embedding: Vec<f64>,
    #[validate(length(min = 8, max = 512), custom(function = "all_finite"))]
    pub tower_asset_embedding: Vec<f64>,
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub risk_budget: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationOutput {
    pub decision_id: String,
    pub account_id: String,
    pub ticker: String,
    pub allocation_score: f64,
    pub target_weight: f64,
    pub timestamp: DateTime<Utc>,
}
