//! Feed normalizer: converts the two supported upstream record shapes into
//! a uniform sequence of [`AssetSnapshot`].
//!
//! A malformed individual record is skipped and counted; it never fails the
//! batch. A payload whose top-level shape is wrong is a feed-level decode
//! error and marks the whole markets section degraded.

use serde::Deserialize;
use serde_json::Value;

use crate::feed::FeedError;
use crate::AssetSnapshot;

/// Result of normalizing one upstream batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBatch {
    pub snapshots: Vec<AssetSnapshot>,
    pub skipped: usize,
}

impl NormalizedBatch {
    fn push_skip(&mut self) {
        self.skipped += 1;
    }
}

/// One row of the market-summary list shape (CoinGecko `/coins/markets`).
/// Field names are bit-exact upstream names.
#[derive(Debug, Deserialize)]
struct MarketSummaryRow {
    name: String,
    symbol: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default)]
    circulating_supply: Option<f64>,
    #[serde(default)]
    total_supply: Option<f64>,
}

/// One entry of the simple-price mapping shape (CoinGecko `/simple/price`),
/// keyed externally by asset identifier.
#[derive(Debug, Deserialize)]
struct SimplePriceEntry {
    #[serde(default)]
    usd: Option<f64>,
    #[serde(default)]
    usd_24hr_change: Option<f64>,
    #[serde(default)]
    usd_market_cap: Option<f64>,
    #[serde(default)]
    usd_24hr_vol: Option<f64>,
}

/// Normalizes a market-summary list payload.
pub fn normalize_market_summary(payload: &Value) -> Result<NormalizedBatch, FeedError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| FeedError::decode("market summary payload is not a JSON array"))?;

    let mut batch = NormalizedBatch::default();
    for row in rows {
        // Guard the shape first: serde would otherwise decode an array row
        // positionally into the struct fields.
        if !row.is_object() {
            batch.push_skip();
            continue;
        }
        let Ok(row) = serde_json::from_value::<MarketSummaryRow>(row.clone()) else {
            batch.push_skip();
            continue;
        };

        let id = row
            .id
            .unwrap_or_else(|| row.symbol.to_ascii_lowercase());
        match AssetSnapshot::new(
            id,
            row.name,
            row.symbol,
            row.current_price.unwrap_or(0.0),
            row.price_change_percentage_24h,
            row.market_cap.unwrap_or(0.0),
            row.total_volume.unwrap_or(0.0),
            row.circulating_supply,
            row.total_supply,
        ) {
            Ok(snapshot) => batch.snapshots.push(snapshot),
            Err(error) => {
                tracing::debug!(%error, "skipping malformed market summary record");
                batch.push_skip();
            }
        }
    }

    if batch.skipped > 0 {
        tracing::warn!(
            skipped = batch.skipped,
            kept = batch.snapshots.len(),
            "market summary batch had malformed records"
        );
    }

    Ok(batch)
}

/// Normalizes a simple-price mapping payload. The mapping key doubles as
/// identifier and display name; supply figures are absent in this shape.
pub fn normalize_simple_price(payload: &Value) -> Result<NormalizedBatch, FeedError> {
    let entries = payload
        .as_object()
        .ok_or_else(|| FeedError::decode("simple price payload is not a JSON object"))?;

    let mut batch = NormalizedBatch::default();
    for (asset_id, entry) in entries {
        if !entry.is_object() {
            batch.push_skip();
            continue;
        }
        let Ok(entry) = serde_json::from_value::<SimplePriceEntry>(entry.clone()) else {
            batch.push_skip();
            continue;
        };

        match AssetSnapshot::new(
            asset_id.clone(),
            asset_id.clone(),
            asset_id.clone(),
            entry.usd.unwrap_or(0.0),
            entry.usd_24hr_change,
            entry.usd_market_cap.unwrap_or(0.0),
            entry.usd_24hr_vol.unwrap_or(0.0),
            None,
            None,
        ) {
            Ok(snapshot) => batch.snapshots.push(snapshot),
            Err(error) => {
                tracing::debug!(%error, asset_id, "skipping malformed simple price record");
                batch.push_skip();
            }
        }
    }

    if batch.skipped > 0 {
        tracing::warn!(
            skipped = batch.skipped,
            kept = batch.snapshots.len(),
            "simple price batch had malformed records"
        );
    }

    Ok(batch)
}
