//! CoinGecko price feed: URL construction and payload parsing for the two
//! supported upstream shapes. Transport is supplied by the pipeline.

use serde_json::Value;

use crate::feed::FeedError;
use crate::normalize::{normalize_market_summary, normalize_simple_price, NormalizedBatch};

pub const MARKETS_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/markets";
pub const SIMPLE_PRICE_ENDPOINT: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Builds the market-summary list URL for the given portfolio ids.
pub fn markets_url(ids: &[String]) -> String {
    format!(
        "{MARKETS_ENDPOINT}?vs_currency=usd&ids={}&order=market_cap_desc&per_page=250&page=1&sparkline=false",
        urlencoding::encode(&ids.join(","))
    )
}

/// Builds the simple-price mapping URL for the given portfolio ids.
pub fn simple_price_url(ids: &[String]) -> String {
    format!(
        "{SIMPLE_PRICE_ENDPOINT}?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
        urlencoding::encode(&ids.join(","))
    )
}

/// Parses and normalizes a market-summary list body.
pub fn parse_markets(body: &str) -> Result<NormalizedBatch, FeedError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|error| FeedError::decode(format!("markets body is not JSON: {error}")))?;
    normalize_market_summary(&payload)
}

/// Parses and normalizes a simple-price mapping body.
pub fn parse_simple_price(body: &str) -> Result<NormalizedBatch, FeedError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|error| FeedError::decode(format!("simple price body is not JSON: {error}")))?;
    normalize_simple_price(&payload)
}

/// Deterministic market-summary payload for offline runs and tests.
pub const OFFLINE_MARKETS: &str = r#"[
  {"id": "ethereum", "name": "Ethereum", "symbol": "eth",
   "current_price": 2450.12, "price_change_percentage_24h": -1.84,
   "market_cap": 294000000000.0, "total_volume": 14200000000.0,
   "circulating_supply": 120250000.0, "total_supply": 120250000.0},
  {"id": "kaspa", "name": "Kaspa", "symbol": "kas",
   "current_price": 0.1612, "price_change_percentage_24h": 2.31,
   "market_cap": 3900000000.0, "total_volume": 61000000.0,
   "circulating_supply": 24300000000.0, "total_supply": 28700000000.0},
  {"id": "fetch-ai", "name": "Artificial Superintelligence Alliance", "symbol": "fet",
   "current_price": 1.31, "price_change_percentage_24h": -4.02,
   "market_cap": 3300000000.0, "total_volume": 182000000.0,
   "circulating_supply": 2520000000.0, "total_supply": 2714000000.0},
  {"id": "the-graph", "name": "The Graph", "symbol": "grt",
   "current_price": 0.214, "price_change_percentage_24h": -2.97,
   "market_cap": 2050000000.0, "total_volume": 74000000.0,
   "circulating_supply": 9550000000.0, "total_supply": 10800000000.0},
  {"id": "sui", "name": "Sui", "symbol": "sui",
   "current_price": 0.92, "price_change_percentage_24h": 0.45,
   "market_cap": 2400000000.0, "total_volume": 310000000.0,
   "circulating_supply": 2610000000.0, "total_supply": 10000000000.0},
  {"id": "gala", "name": "Gala", "symbol": "gala",
   "current_price": 0.0231, "price_change_percentage_24h": -3.11,
   "market_cap": 810000000.0, "total_volume": 55000000.0,
   "circulating_supply": 35100000000.0, "total_supply": null}
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markets_url_encodes_joined_ids() {
        let ids = vec![String::from("fetch-ai"), String::from("the-graph")];
        let url = markets_url(&ids);
        assert!(url.starts_with(MARKETS_ENDPOINT));
        assert!(url.contains("ids=fetch-ai%2Cthe-graph"));
        assert!(url.contains("vs_currency=usd"));
    }

    #[test]
    fn offline_payload_normalizes_cleanly() {
        let batch = parse_markets(OFFLINE_MARKETS).expect("bundled payload parses");
        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.snapshots.len(), 6);
        assert_eq!(batch.snapshots[0].id, "ethereum");
        assert_eq!(batch.snapshots[5].total_supply, None);
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let error = parse_markets("<html>rate limited</html>").expect_err("must fail");
        assert_eq!(error.code(), "feed.decode");
    }
}
