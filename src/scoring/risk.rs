//! Historical-simulation VaR with a baseline drift detector

use crate::models::{FeatureMap, RiskRequest, MIN_PNL_OBSERVATIONS};
use super::Scored;

/// Number of equal-probability bins for the percentile cut points
const QUANTILE_BINS: usize = 100;

/// Share of VaR-99 credited in the attribution seed
const VAR99_ATTRIBUTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScore {
    pub var95: f64,
    pub var99: f64,
    /// Relative deviation of VaR-95 from the baseline
    pub drift_score: f64,
    pub breach: bool,
}

/// Cut point `i` (1-based, `1..QUANTILE_BINS`) of an ascending series,
/// exclusive method with linear interpolation.
///
/// Returns `None` for fewer than two observations or an out-of-range cut point.
pub fn quantile_cut(sorted: &[f64], i: usize) -> Option<f64> {
    let len = sorted.len();
    if len < 2 || i == 0 || i >= QUANTILE_BINS {
        return None;
    }

    let n = QUANTILE_BINS as i64;
    let m = len as i64 + 1;
    let pos = i as i64 * m;
    let j = (pos / n).clamp(1, len as i64 - 1);
    // can exceed n when the cut point falls past the last observation
    let delta = pos - j * n;

    let lower = sorted[(j - 1) as usize];
    let upper = sorted[j as usize];
    Some((lower * (n - delta) as f64 + upper * delta as f64) / n as f64)
}

/// Losses sorted ascending (negated P&L)
pub fn sorted_losses(pnl: &[f64]) -> Vec<f64> {
    let mut losses: Vec<f64> = pnl.iter().map(|x| -x).collect();
    losses.sort_by(f64::total_cmp);
    losses
}

pub fn score(req: &RiskRequest) -> Scored<RiskScore> {
    let losses = sorted_losses(&req.pnl_series);
    debug_assert!(
        losses.len() >= MIN_PNL_OBSERVATIONS,
        "risk scoring needs at least {} observations, got {}",
        MIN_PNL_OBSERVATIONS,
        losses.len()
    );
    // Only reachable with fewer than two observations, which validation rejects
    let var95 = quantile_cut(&losses, 95).unwrap_or(f64::NAN);
    let var99 = quantile_cut(&losses, 99).unwrap_or(f64::NAN);

    let drift_score = (var95 - req.baseline_var_95).abs() / req.baseline_var_95;
    let breach = drift_score > req.drift_threshold;

    tracing::debug!(var95, var99, drift_score, breach, "risk scored");

    let raw_features = FeatureMap::new()
        .with("var95", var95)
        .with("var99", var99)
        .with("baseline_var95", req.baseline_var_95)
        .with("drift_threshold", req.drift_threshold);

    let attribution_seed = FeatureMap::new()
        .with("var95", var95)
        .with("var99", var99 * VAR99_ATTRIBUTION)
        .with("baseline_var95", -req.baseline_var_95)
        .with("drift_threshold", -req.drift_threshold);

    Scored {
        score: RiskScore { var95, var99, drift_score, breach },
        raw_features,
        attribution_seed,
    }
}
