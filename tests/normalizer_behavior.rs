//! Batch-level normalizer behavior: malformed records reduce the output
//! count by exactly their number and never raise to the caller.

use ampel_core::{normalize_market_summary, normalize_simple_price};
use serde_json::json;

#[test]
fn malformed_market_rows_reduce_output_by_their_count() {
    let good = json!({"name": "Ethereum", "symbol": "eth", "current_price": 2450.0});
    let bad_type = json!({"name": "Broken", "symbol": "brk", "current_price": "2450"});
    let bad_shape = json!(["not", "an", "object"]);
    let bad_value = json!({"name": "Neg", "symbol": "neg", "current_price": -1.0});

    let payload = json!([good.clone(), bad_type, bad_shape, bad_value, good]);
    let batch = normalize_market_summary(&payload).expect("list payload");

    assert_eq!(batch.snapshots.len(), 2);
    assert_eq!(batch.skipped, 3);
    assert_eq!(batch.snapshots.len() + batch.skipped, 5);
}

#[test]
fn empty_market_list_yields_empty_batch() {
    let batch = normalize_market_summary(&json!([])).expect("list payload");
    assert!(batch.snapshots.is_empty());
    assert_eq!(batch.skipped, 0);
}

#[test]
fn simple_price_mapping_keys_become_identifiers() {
    let payload = json!({
        "fetch-ai": {"usd": 1.31, "usd_24hr_change": -4.0},
        "the-graph": {"usd": 0.21}
    });

    let batch = normalize_simple_price(&payload).expect("mapping payload");
    assert_eq!(batch.snapshots.len(), 2);
    for snapshot in &batch.snapshots {
        assert_eq!(snapshot.id, snapshot.name);
        assert!(snapshot.circulating_supply.is_none());
        assert!(snapshot.total_supply.is_none());
    }
}

#[test]
fn simple_price_malformed_entries_are_counted_not_fatal() {
    let payload = json!({
        "good": {"usd": 1.0},
        "bad-one": {"usd": {"nested": true}},
        "bad-two": 17
    });

    let batch = normalize_simple_price(&payload).expect("mapping payload");
    assert_eq!(batch.snapshots.len(), 1);
    assert_eq!(batch.skipped, 2);
}

#[test]
fn top_level_shape_mismatch_is_a_feed_error() {
    assert!(normalize_market_summary(&json!({"rows": []})).is_err());
    assert!(normalize_simple_price(&json!(["row"])).is_err());
}
