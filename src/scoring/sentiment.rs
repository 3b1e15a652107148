//! Lexicon sentiment model

use crate::models::{FeatureMap, SentimentRequest};
use super::Scored;

const POSITIVE_TERMS: [&str; 5] = ["beat", "growth", "upgrade", "strong", "outperform"];
const NEGATIVE_TERMS: [&str; 5] = ["miss", "downgrade", "weak", "investigation", "loss"];

const BASE_CONFIDENCE: f64 = 0.55;
const CONFIDENCE_PER_NET_HIT: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.99;

/// Weight of document length in the attribution seed
const LENGTH_ATTRIBUTION: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub positive_hits: usize,
    pub negative_hits: usize,
    /// Net polarity in [-1, 1]
    pub score: f64,
    /// In [0.55, 0.99]
    pub confidence: f64,
}

/// Non-overlapping substring hits of every term
fn count_hits(text: &str, terms: &[&str]) -> usize {
    terms.iter().map(|term| text.matches(term).count()).sum()
}

pub fn score(req: &SentimentRequest) -> Scored<SentimentScore> {
    let text = req.document_text.to_lowercase();
    let pos = count_hits(&text, &POSITIVE_TERMS);
    let neg = count_hits(&text, &NEGATIVE_TERMS);

    let net = pos as f64 - neg as f64;
    let score = net / (pos + neg).max(1) as f64;
    let confidence = (BASE_CONFIDENCE + net.abs() * CONFIDENCE_PER_NET_HIT).min(MAX_CONFIDENCE);
    let text_length = req.document_text.chars().count() as f64;

    tracing::debug!(pos, neg, score, confidence, "sentiment scored");

    let raw_features = FeatureMap::new()
        .with("positive_token_hits", pos as f64)
        .with("negative_token_hits", neg as f64)
        .with("text_length", text_length);

    let attribution_seed = FeatureMap::new()
        .with("positive_token_hits", pos as f64)
        .with("negative_token_hits", -(neg as f64))
        .with("text_length", text_length * LENGTH_ATTRIBUTION);

    Scored {
        score: SentimentScore { positive_hits: pos, negative_hits: neg, score, confidence },
        raw_features,
        attribution_seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(text: &str) -> SentimentRequest {
        SentimentRequest {
            ticker: "TSLA".to_string(),
            document_text: text.to_string(),
            source_type: "news".to_string(),
        }
    }

    #[test]
    fn test_mixed_document() {
        let scored = score(&request("strong growth beat, no downgrade at all"));
        let s = scored.score;
        assert_eq!(s.positive_hits, 3);
        assert_eq!(s.negative_hits, 1);
        assert_eq!(s.score, 0.5);
        assert!((s.confidence - 0.65).abs() < 1e-12);
        assert_eq!(scored.raw_features.get("text_length"), Some(39.0));
    }

    #[test]
    fn test_case_insensitive_and_substrings() {
        // "Outperformed" and "LOSSES" still hit
        let s = score(&request("Shares OUTPERFORMED despite LOSSES elsewhere")).score;
        assert_eq!(s.positive_hits, 1);
        assert_eq!(s.negative_hits, 1);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.confidence, 0.55);
    }

    #[test]
    fn test_no_hits_is_neutral() {
        let s = score(&request("the quarterly call was uneventful")).score;
        assert_eq!(s.score, 0.0);
        assert_eq!(s.confidence, 0.55);
    }

    #[test]
    fn test_confidence_caps() {
        let text = "beat ".repeat(20);
        let s = score(&request(&text)).score;
        assert_eq!(s.score, 1.0);
        assert_eq!(s.confidence, 0.99);
    }

    #[test]
    fn test_seed_weights() {
        let scored = score(&request("weak guidance and a new investigation"));
        assert_eq!(scored.raw_features.get("negative_token_hits"), Some(2.0));
        assert_eq!(scored.attribution_seed.get("negative_token_hits"), Some(-2.0));
        let len = scored.raw_features.get("text_length").unwrap();
        assert!((scored.attribution_seed.get("text_length").unwrap() - len * 0.0001).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_score_and_confidence_bounds(text in "[a-z ]{20,200}") {
            let s = score(&request(&text)).score;
            prop_assert!((-1.0..=1.0).contains(&s.score));
            prop_assert!((0.55..=0.99).contains(&s.confidence));
        }

        #[test]
        fn prop_lexicon_heavy_text_stays_bounded(
            words in prop::collection::vec(
                prop::sample::select(vec!["beat", "miss", "growth", "weak", "loss", "upgrade", "flat"]),
                5..80,
            )
        ) {
            let s = score(&request(&words.join(" "))).score;
            prop_assert!((-1.0..=1.0).contains(&s.score));
            prop_assert!((0.55..=0.99).contains(&s.confidence));
        }
    }
}
