//! Sentiment request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SentimentRequest {
    #[validate(length(min = 1, max = 32))]
    pub ticker: String,
    #[validate(length(min = 20))]
    pub document_text: String,
    /// news | sec_filing
    pub source_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentOutput {
    pub decision_id: String,
    pub ticker: String,
    pub sentiment_score: f64,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fits_storage_column() {
        let mut req = SentimentRequest {
            ticker: "T".repeat(32),
            document_text: "earnings call transcript text".to_string(),
            source_type: "news".to_string(),
        };
        assert!(req.validate().is_ok());

        req.ticker = "T".repeat(33);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_document_length_counts_characters() {
        let mut req = SentimentRequest {
            ticker: "AAPL".to_string(),
            document_text: "short text".to_string(),
            source_type: "news".to_string(),
        };
        assert!(req.validate().is_err());

        // 20 characters, more than 20 bytes
        req.document_text = "é".repeat(20);
        assert!(req.validate().is_ok());

        req.document_text = "é".repeat(19);
        assert!(req.validate().is_err());
    }
}
