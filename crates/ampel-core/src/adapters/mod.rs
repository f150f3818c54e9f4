//! Per-feed payload handling: endpoint URLs, wire shapes, and parsing into
//! domain records. All adapters are transport-free; the pipeline owns the
//! HTTP calls.

pub mod coingecko;
pub mod macro_feed;
pub mod sentiment;
pub mod whale;
