//! Large-transfer ("whale") feed. Absence of data or a non-success upstream
//! status is surfaced as "no data", never as an error escaping the cycle.

use serde::Deserialize;
use serde_json::Value;

use crate::feed::FeedError;
use crate::WhaleTransfer;

pub const ENDPOINT: &str = "https://api.whale-alert.io/v1/transactions";

#[derive(Debug, Deserialize)]
struct TransferRow {
    amount: f64,
    coin_symbol: String,
    #[serde(default)]
    from_label: Option<String>,
    #[serde(default)]
    to_label: Option<String>,
    amount_usd: f64,
}

/// Parses a transfer feed body. Individually malformed rows are dropped;
/// an empty result means "no data" to the pipeline.
pub fn parse_transfers(body: &str) -> Result<Vec<WhaleTransfer>, FeedError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|error| FeedError::decode(format!("transfer body is not JSON: {error}")))?;

    let rows = payload
        .as_array()
        .ok_or_else(|| FeedError::decode("transfer payload is not a JSON array"))?;

    let transfers = rows
        .iter()
        .filter_map(|row| serde_json::from_value::<TransferRow>(row.clone()).ok())
        .map(|row| WhaleTransfer {
            amount: row.amount,
            coin_symbol: row.coin_symbol.to_uppercase(),
            from_label: row.from_label.unwrap_or_else(|| String::from("unknown")),
            to_label: row.to_label.unwrap_or_else(|| String::from("unknown")),
            amount_usd: row.amount_usd,
        })
        .collect();

    Ok(transfers)
}
