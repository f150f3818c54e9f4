use thiserror::Error;

/// Validation and contract errors exposed by `ampel-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("asset identifier cannot be empty")]
    EmptyAssetId,
    #[error("asset symbol cannot be empty")]
    EmptyAssetSymbol,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("macro series '{indicator}' must be ordered by timestamp ascending")]
    UnorderedSeries { indicator: &'static str },

    #[error("sentiment index {value} is outside the 0-100 range")]
    SentimentOutOfRange { value: i64 },
    #[error("sentiment classification cannot be empty")]
    EmptySentimentClassification,

    #[error("invalid section '{value}', expected one of radar, sentiment, whale")]
    InvalidSection { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix timestamp {value} is out of range")]
    TimestampOutOfRange { value: i64 },
}
