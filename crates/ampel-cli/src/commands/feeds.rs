use ampel_core::adapters::{coingecko, sentiment, whale};
use ampel_core::FeedId;
use serde::Serialize;

use super::CommandOutput;

/// One row of the `feeds` listing.
#[derive(Debug, Clone, Serialize)]
pub struct FeedListing {
    pub feed: FeedId,
    pub endpoint: &'static str,
    pub optional: bool,
}

pub fn run() -> CommandOutput {
    CommandOutput::Feeds(vec![
        FeedListing {
            feed: FeedId::Markets,
            endpoint: coingecko::MARKETS_ENDPOINT,
            optional: false,
        },
        FeedListing {
            feed: FeedId::MacroSeries,
            endpoint: "bundled (or --macro-url)",
            optional: false,
        },
        FeedListing {
            feed: FeedId::Sentiment,
            endpoint: sentiment::ENDPOINT,
            optional: true,
        },
        FeedListing {
            feed: FeedId::Whale,
            endpoint: whale::ENDPOINT,
            optional: true,
        },
    ])
}
