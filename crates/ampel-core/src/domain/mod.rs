mod models;
mod timestamp;

pub use models::{
    AssetSnapshot, MacroIndicator, MacroPoint, MacroSeries, SentimentReading, WhaleTransfer,
};
pub use timestamp::UtcDateTime;
