//! Market signal aggregation engine for ampel.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Feed normalizers for the supported upstream payload shapes
//! - Pure signal derivation: breadth, macro risk score, radar ratios
//! - The traffic-light classifier
//! - The parameterized refresh pipeline and its transport contract

pub mod adapters;
pub mod domain;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod signal;

pub use domain::{
    AssetSnapshot, MacroIndicator, MacroPoint, MacroSeries, SentimentReading, UtcDateTime,
    WhaleTransfer,
};
pub use error::ValidationError;
pub use feed::{FeedError, FeedErrorKind, FeedId, FeedStatus};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT_MS,
};
pub use normalize::{normalize_market_summary, normalize_simple_price, NormalizedBatch};
pub use pipeline::{
    CycleConfig, CycleMeta, CycleReport, MarketShape, Refresher, Section, SectionSet,
    DEFAULT_PORTFOLIO,
};
pub use signal::{
    assess_macro, breadth_ratio, classify, radar_records, trend_label, Assessment, BreadthRatio,
    Classification, MacroAssessment, MacroInterpretation, MacroTrends, RadarRecord, RiskScore,
    TrendLabel,
};
