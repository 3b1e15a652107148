//! Attribution normalizer
//!
//! Turns signed per-feature contributions into a proportional summary and a
//! short justification string. Pure functions, no I/O.

use crate::models::{round_to, AttributionSummary, ExplanationPayload, FeatureMap, ModelCard};

/// Decimal places kept in normalized weights
const WEIGHT_PRECISION: usize = 6;

/// Features listed in the explanation text
const TOP_FEATURES: usize = 3;

/// Scale each contribution by the total absolute contribution.
///
/// An all-zero map divides by 1.0 and yields all-zero weights.
pub fn normalize(features: &FeatureMap) -> AttributionSummary {
    let total = features.total_magnitude();
    let denominator = if total == 0.0 { 1.0 } else { total };

    features
        .iter()
        .map(|(name, value)| (name, round_to(value / denominator, WEIGHT_PRECISION)))
        .collect()
}

/// `"<agent> decision driven primarily by: k1=v1, k2=v2, k3=v3."`
pub fn explanation_text(agent_name: &str, features: &FeatureMap) -> String {
    let mut ranked: Vec<(&str, f64)> = features.iter().collect();
    // sort_by is stable: equal magnitudes keep insertion order
    ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    let top = ranked
        .iter()
        .take(TOP_FEATURES)
        .map(|(name, value)| format!("{}={:.4}", name, value))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{} decision driven primarily by: {}.", agent_name, top)
}

/// Build the explanation for one decision.
///
/// `attribution_seed` drives both the summary and the text; `raw_features`
/// is recorded as-is.
pub fn build_payload(
    model: &ModelCard,
    raw_features: FeatureMap,
    attribution_seed: &FeatureMap,
) -> ExplanationPayload {
    ExplanationPayload {
        model_name: model.model_name.to_string(),
        model_version: model.model_version.to_string(),
        feature_attributions: raw_features,
        shap_summary: normalize(attribution_seed),
        explanation_text: explanation_text(model.agent_name, attribution_seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_proportional_with_sign() {
        let features = FeatureMap::new().with("a", 3.0).with("b", -1.0);
        let summary = normalize(&features);
        assert_eq!(summary.get("a"), Some(0.75));
        assert_eq!(summary.get("b"), Some(-0.25));
    }

    #[test]
    fn test_normalize_all_zero() {
        let features = FeatureMap::new().with("a", 0.0).with("b", 0.0);
        let summary = normalize(&features);
        assert_eq!(summary.get("a"), Some(0.0));
        assert_eq!(summary.get("b"), Some(0.0));
    }

    #[test]
    fn test_normalize_rounds_to_six_places() {
        let features = FeatureMap::new().with("a", 1.0).with("b", 2.0);
        let summary = normalize(&features);
        assert_eq!(summary.get("a"), Some(0.333333));
        assert_eq!(summary.get("b"), Some(0.666667));
    }

    #[test]
    fn test_explanation_text_top_three() {
        let features = FeatureMap::new()
            .with("small", 0.1)
            .with("negative", -5.0)
            .with("mid", 2.0)
            .with("large", 3.0);

        let text = explanation_text("Risk Agent", &features);
        assert_eq!(
            text,
            "Risk Agent decision driven primarily by: negative=-5.0000, large=3.0000, mid=2.0000."
        );
    }

    #[test]
    fn test_explanation_text_stable_ties() {
        let features = FeatureMap::new()
            .with("first", 1.0)
            .with("second", -1.0)
            .with("third", 1.0)
            .with("fourth", 1.0);

        let text = explanation_text("Sentiment Agent", &features);
        assert_eq!(
            text,
            "Sentiment Agent decision driven primarily by: first=1.0000, second=-1.0000, third=1.0000."
        );
    }

    #[test]
    fn test_explanation_text_fewer_than_three() {
        let features = FeatureMap::new().with("only", 0.25);
        assert_eq!(
            explanation_text("Portfolio Agent", &features),
            "Portfolio Agent decision driven primarily by: only=0.2500."
        );
    }

    #[test]
    fn test_build_payload_uses_seed_for_summary() {
        let card = ModelCard {
            agent_name: "Portfolio Agent",
            model_name: "two-tower-allocator",
            model_version: "2026.02",
        };
        let raw = FeatureMap::new().with("x", 2.0).with("y", 2.0);
        let seed = FeatureMap::new().with("x", 2.0).with("y", -6.0);

        let payload = build_payload(&card, raw.clone(), &seed);
        assert_eq!(payload.feature_attributions, raw);
        assert_eq!(payload.shap_summary.get("y"), Some(-0.75));
        assert!(payload.explanation_text.starts_with("Portfolio Agent decision driven primarily by: y=-6.0000"));
    }

    fn feature_map() -> impl Strategy<Value = FeatureMap> {
        prop::collection::vec(-1.0e6f64..1.0e6, 1..12).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (format!("f{}", i), v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_normalized_magnitudes_sum_to_one(features in feature_map()) {
            let summary = normalize(&features);
            let sum: f64 = summary.values().map(f64::abs).sum();
            if features.total_magnitude() > 0.0 {
                // each weight carries at most 5e-7 rounding error
                prop_assert!((sum - 1.0).abs() <= 1e-6 + 5e-7 * features.len() as f64);
            } else {
                prop_assert_eq!(sum, 0.0);
            }
            for weight in summary.values() {
                prop_assert!((-1.0..=1.0).contains(&weight));
            }
        }

        #[test]
        fn prop_explanation_lists_at_most_three_in_order(features in feature_map()) {
            let text = explanation_text("Agent", &features);
            let listed = text
                .trim_start_matches("Agent decision driven primarily by: ")
                .trim_end_matches('.');
            let names: Vec<&str> = listed
                .split(", ")
                .map(|item| item.split('=').next().unwrap_or(""))
                .collect();

            prop_assert!(names.len() <= 3);
            prop_assert_eq!(names.len(), features.len().min(3));
            let magnitudes: Vec<f64> = names
                .iter()
                .map(|n| features.get(n).map(f64::abs).unwrap_or(f64::NAN))
                .collect();
            for pair in magnitudes.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
        }
    }
}
