//! Risk request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;
use chrono::{DateTime, Utc};

use super::{all_finite, finite};

pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.15;

/// Smallest P&L series accepted; keep in step with the length rule below
pub const MIN_PNL_OBSERVATIONS: usize = 30;

fn default_drift_threshold() -> f64 {
    DEFAULT_DRIFT_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RiskRequest {
    #[validate(length(min = 1, max = 255))]
    pub account_id: String,
    #[validate(length(min = 30), custom(function = "all_finite"))]
    pub pnl_series: Vec<f64>,
    #[validate(range(exclusive_min = 0.0), custom(function = "finite"))]
    pub baseline_var_95: f64,
    #[serde(default = "default_drift_threshold")]
    #[validate(range(exclusive_min = 0.0), custom(function = "finite"))]
    pub drift_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskOutput {
    pub decision_id: String,
    pub account_id: String,
    pub var_95: f64,
    pub var_99: f64,
    pub drift_score: f64,
    pub breach_flag: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_threshold_defaults() {
        let json = serde_json::json!({
            "account_id": "acct-9",
            "pnl_series": vec![1.0; 30],
            "baseline_var_95": 2.0
        });
        let req: RiskRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.drift_threshold, DEFAULT_DRIFT_THRESHOLD);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_account_id_fits_storage_column() {
        let mut req = RiskRequest {
            account_id: "a".repeat(255),
            pnl_series: vec![0.5; MIN_PNL_OBSERVATIONS],
            baseline_var_95: 1.0,
            drift_threshold: 0.15,
        };
        assert!(req.validate().is_ok());

        req.account_id = "a".repeat(256);
        assert!(req.validate().is_err());

        req.account_id = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_short_series_and_bad_thresholds() {
        let base = RiskRequest {
            account_id: "acct-9".to_string(),
            pnl_series: vec![0.5; 30],
            baseline_var_95: 1.0,
            drift_threshold: 0.15,
        };
        assert!(base.validate().is_ok());

        let short = RiskRequest { pnl_series: vec![0.5; 29], ..base.clone() };
        assert!(short.validate().is_err());

        let zero_baseline = RiskRequest { baseline_var_95: 0.0, ..base.clone() };
        assert!(zero_baseline.validate().is_err());

        let zero_threshold = RiskRequest { drift_threshold: 0.0, ..base };
        assert!(zero_threshold.validate().is_err());
    }
}
