use serde::{Deserialize, Serialize};

use crate::AssetSnapshot;

use super::round_dp;

/// Per-asset liquidity/supply snapshot used for fundamental comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRecord {
    pub symbol: String,
    /// 24h volume over market cap, 3 decimals; 0 when the cap is unknown.
    pub volume_ratio: f64,
    /// Circulating over total supply as a percentage, 2 decimals; 0 when
    /// the total supply is unknown.
    pub supply_used_pct: f64,
    pub price_usd: f64,
}

/// Computes radar records in input order. A record whose ratios cannot be
/// computed is excluded, never fatal to the batch.
pub fn radar_records(snapshots: &[AssetSnapshot]) -> Vec<RadarRecord> {
    snapshots.iter().filter_map(radar_record).collect()
}

fn radar_record(snapshot: &AssetSnapshot) -> Option<RadarRecord> {
    let volume_ratio = if snapshot.market_cap > 0.0 {
        snapshot.volume_24h / snapshot.market_cap
    } else {
        0.0
    };

    let supply_used_pct = match (snapshot.circulating_supply, snapshot.total_supply) {
        (Some(circulating), Some(total)) if total > 0.0 => 100.0 * circulating / total,
        // A known positive total with an unknown circulating figure is an
        // uncomputable ratio, not a zero one.
        (None, Some(total)) if total > 0.0 => {
            tracing::debug!(symbol = %snapshot.symbol, "excluding radar record with unknown circulating supply");
            return None;
        }
        _ => 0.0,
    };

    if !volume_ratio.is_finite() || !supply_used_pct.is_finite() {
        tracing::debug!(symbol = %snapshot.symbol, "excluding uncomputable radar record");
        return None;
    }

    Some(RadarRecord {
        symbol: snapshot.symbol.to_uppercase(),
        volume_ratio: round_dp(volume_ratio, 3),
        supply_used_pct: round_dp(supply_used_pct, 2),
        price_usd: snapshot.price_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        symbol: &str,
        market_cap: f64,
        volume: f64,
        circulating: Option<f64>,
        total: Option<f64>,
    ) -> AssetSnapshot {
        AssetSnapshot::new(
            symbol, "Asset", symbol, 1.5, None, market_cap, volume, circulating, total,
        )
        .expect("snapshot is valid")
    }

    #[test]
    fn computes_rounded_ratios_in_input_order() {
        let snapshots = vec![
            snapshot("eth", 240_000_000_000.0, 12_000_000_000.0, Some(120.0), Some(120.0)),
            snapshot("kas", 3_000_000_000.0, 75_500_000.0, Some(25_700_000_000.0), Some(28_700_000_000.0)),
        ];

        let records = radar_records(&snapshots);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "ETH");
        assert_eq!(records[0].volume_ratio, 0.05);
        assert_eq!(records[0].supply_used_pct, 100.0);
        assert_eq!(records[1].symbol, "KAS");
        assert_eq!(records[1].volume_ratio, 0.025);
        assert_eq!(records[1].supply_used_pct, 89.55);
    }

    #[test]
    fn zero_denominators_yield_zero_not_error() {
        let snapshots = vec![snapshot("gala", 0.0, 5_000_000.0, Some(35_000_000_000.0), None)];

        let records = radar_records(&snapshots);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].volume_ratio, 0.0);
        assert_eq!(records[0].supply_used_pct, 0.0);
    }

    #[test]
    fn unknown_circulating_with_known_total_is_excluded() {
        let snapshots = vec![
            snapshot("eth", 100.0, 10.0, Some(50.0), Some(100.0)),
            snapshot("sui", 100.0, 10.0, None, Some(100.0)),
        ];
        let records = radar_records(&snapshots);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "ETH");
    }

    #[test]
    fn zero_total_supply_yields_zero_pct() {
        let snapshots = vec![snapshot("flux", 100.0, 10.0, Some(1.0), Some(0.0))];
        let records = radar_records(&snapshots);
        assert_eq!(records[0].supply_used_pct, 0.0);
    }
}
