//! Scoring models
//!
//! Each model maps a validated request to its score fields, the raw features
//! it computed, and a separately weighted attribution seed used to explain it.

pub mod allocation;
pub mod risk;
pub mod sentiment;

use crate::models::FeatureMap;

/// Output of one scoring pass
#[derive(Debug, Clone)]
pub struct Scored<T> {
    pub score: T,
    pub raw_features: FeatureMap,
    pub attribution_seed: FeatureMap,
}
