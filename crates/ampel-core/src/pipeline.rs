//! One refresh cycle: fetch each enabled feed, normalize, derive signals,
//! classify. Feeds fail independently; a degraded feed marks its section
//! and the cycle still completes.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

use crate::adapters::{coingecko, macro_feed, sentiment, whale};
use crate::adapters::macro_feed::MacroSet;
use crate::feed::{FeedError, FeedId, FeedStatus};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::normalize::NormalizedBatch;
use crate::signal::{
    assess_macro, breadth_ratio, radar_records, Assessment, BreadthRatio, MacroAssessment,
    RadarRecord,
};
use crate::{AssetSnapshot, SentimentReading, UtcDateTime, ValidationError, WhaleTransfer};

/// The fixed personal portfolio tracked by default, by CoinGecko id.
pub const DEFAULT_PORTFOLIO: [&str; 41] = [
    "sei-network",
    "sui",
    "filecoin",
    "fetch-ai",
    "graphlinq-protocol",
    "the-graph",
    "ethereum",
    "xai",
    "starknet",
    "immutable-x",
    "polygon",
    "hedera",
    "astar",
    "api3",
    "flux",
    "portal",
    "skey-network",
    "near",
    "neurai",
    "singularitynet",
    "gala",
    "chirpley",
    "vulcan-forged",
    "kaspa",
    "storj",
    "yourai",
    "audius",
    "zetachain",
    "smooth-love-potion",
    "fantom",
    "duel-network",
    "gamerx",
    "red-pulse-phoenix",
    "neat-protocol",
    "supra",
    "slp",
    "phala",
    "chrap",
    "phb",
    "duel",
    "gmrx",
];

/// Optional report sections beyond the always-on market and macro ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Radar,
    Sentiment,
    Whale,
}

impl Section {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radar => "radar",
            Self::Sentiment => "sentiment",
            Self::Whale => "whale",
        }
    }
}

impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "radar" => Ok(Self::Radar),
            "sentiment" => Ok(Self::Sentiment),
            "whale" => Ok(Self::Whale),
            other => Err(ValidationError::InvalidSection {
                value: other.to_owned(),
            }),
        }
    }
}

/// Enabled-section switch set. One parameterized pipeline replaces the
/// overlapping page variants of the original dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSet {
    pub radar: bool,
    pub sentiment: bool,
    pub whale: bool,
}

impl Default for SectionSet {
    fn default() -> Self {
        Self {
            radar: true,
            sentiment: true,
            whale: true,
        }
    }
}

impl SectionSet {
    pub const fn none() -> Self {
        Self {
            radar: false,
            sentiment: false,
            whale: false,
        }
    }

    pub fn from_sections(sections: &[Section]) -> Self {
        let mut set = Self::none();
        for section in sections {
            match section {
                Section::Radar => set.radar = true,
                Section::Sentiment => set.sentiment = true,
                Section::Whale => set.whale = true,
            }
        }
        set
    }
}

/// Which of the two supported upstream price shapes to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketShape {
    #[default]
    Markets,
    SimplePrice,
}

/// Cycle parameters. One config drives one refresh; nothing is shared
/// across cycles.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub portfolio: Vec<String>,
    pub shape: MarketShape,
    pub sections: SectionSet,
    pub timeout_ms: u64,
    /// Use bundled deterministic payloads instead of the network.
    pub offline: bool,
    /// Macro endpoint serving the parallel-array shape; the bundled
    /// dataset is used when unset.
    pub macro_url: Option<String>,
    pub whale_url: String,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            portfolio: DEFAULT_PORTFOLIO.iter().map(|id| (*id).to_owned()).collect(),
            shape: MarketShape::default(),
            sections: SectionSet::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            offline: false,
            macro_url: None,
            whale_url: whale::ENDPOINT.to_owned(),
        }
    }
}

/// Cycle metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleMeta {
    pub cycle_id: Uuid,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSection {
    pub status: FeedStatus,
    pub snapshots: Vec<AssetSnapshot>,
    pub skipped: usize,
    pub breadth: BreadthRatio,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroSection {
    pub status: FeedStatus,
    pub assessment: MacroAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSection {
    pub status: FeedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<SentimentReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSection {
    pub status: FeedStatus,
    pub records: Vec<RadarRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhaleSection {
    pub status: FeedStatus,
    pub transfers: Vec<WhaleTransfer>,
}

/// Everything one cycle exposes to the presentation layer. Plain immutable
/// data; no rendering logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub meta: CycleMeta,
    pub verdict: Assessment,
    pub market: MarketSection,
    pub macro_signal: MacroSection,
    pub radar: RadarSection,
    pub sentiment: SentimentSection,
    pub whale: WhaleSection,
}

impl CycleReport {
    /// Count of sections that did not deliver normally this cycle.
    pub fn degraded_sections(&self) -> usize {
        [
            &self.market.status,
            &self.macro_signal.status,
            &self.radar.status,
            &self.sentiment.status,
            &self.whale.status,
        ]
        .into_iter()
        .filter(|status| status.is_degraded())
        .count()
    }
}

/// Runs refresh cycles against a transport. Holds no cycle state; every
/// entity a cycle produces is owned by that cycle's report.
pub struct Refresher {
    http: Arc<dyn HttpClient>,
    config: CycleConfig,
}

impl Refresher {
    pub fn new(http: Arc<dyn HttpClient>, config: CycleConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Runs one aggregation cycle to completion, possibly degraded, never
    /// failing outright.
    pub async fn run(&self) -> CycleReport {
        let started = Instant::now();
        let mut warnings = Vec::new();

        let (market_status, batch) = self.load_markets(&mut warnings).await;
        let breadth = breadth_ratio(&batch.snapshots);

        let (macro_status, macro_set) = self.load_macro(&mut warnings).await;
        let assessment = match &macro_set {
            Some(set) => assess_macro(
                Some(&set.policy_rate),
                Some(&set.inflation),
                Some(&set.currency_index),
            ),
            None => assess_macro(None, None, None),
        };

        let radar = if self.config.sections.radar {
            RadarSection {
                status: market_status.clone(),
                records: radar_records(&batch.snapshots),
            }
        } else {
            RadarSection {
                status: FeedStatus::Disabled,
                records: Vec::new(),
            }
        };

        let sentiment = if self.config.sections.sentiment {
            self.load_sentiment(&mut warnings).await
        } else {
            SentimentSection {
                status: FeedStatus::Disabled,
                reading: None,
            }
        };

        let whale = if self.config.sections.whale {
            self.load_whale(&mut warnings).await
        } else {
            WhaleSection {
                status: FeedStatus::Disabled,
                transfers: Vec::new(),
            }
        };

        let verdict = Assessment::new(assessment.score, breadth);
        tracing::info!(
            classification = %verdict.classification,
            score = verdict.surfaced_score,
            breadth = %breadth,
            warnings = warnings.len(),
            "cycle complete"
        );

        CycleReport {
            meta: CycleMeta {
                cycle_id: Uuid::new_v4(),
                generated_at: UtcDateTime::now(),
                latency_ms: started.elapsed().as_millis() as u64,
                warnings,
            },
            verdict,
            market: MarketSection {
                status: market_status,
                snapshots: batch.snapshots,
                skipped: batch.skipped,
                breadth,
            },
            macro_signal: MacroSection {
                status: macro_status,
                assessment,
            },
            radar,
            sentiment,
            whale,
        }
    }

    async fn load_markets(&self, warnings: &mut Vec<String>) -> (FeedStatus, NormalizedBatch) {
        let parsed = if self.config.offline {
            coingecko::parse_markets(coingecko::OFFLINE_MARKETS)
        } else if self.config.portfolio.is_empty() {
            Err(FeedError::invalid_request(
                "portfolio has no coin ids to query",
            ))
        } else {
            let url = match self.config.shape {
                MarketShape::Markets => coingecko::markets_url(&self.config.portfolio),
                MarketShape::SimplePrice => coingecko::simple_price_url(&self.config.portfolio),
            };
            match self.fetch(FeedId::Markets, &url).await {
                Ok(body) => match self.config.shape {
                    MarketShape::Markets => coingecko::parse_markets(&body),
                    MarketShape::SimplePrice => coingecko::parse_simple_price(&body),
                },
                Err(error) => Err(error),
            }
        };

        match parsed {
            Ok(batch) => {
                if batch.skipped > 0 {
                    warnings.push(format!(
                        "{} market record(s) skipped during normalization",
                        batch.skipped
                    ));
                }
                (FeedStatus::Ok, batch)
            }
            Err(error) => {
                tracing::warn!(feed = %FeedId::Markets, %error, "feed degraded");
                warnings.push(format!("markets feed degraded: {error}"));
                (FeedStatus::degraded(&error), NormalizedBatch::default())
            }
        }
    }

    async fn load_macro(&self, warnings: &mut Vec<String>) -> (FeedStatus, Option<MacroSet>) {
        let url = match (&self.config.macro_url, self.config.offline) {
            (Some(url), false) => url.clone(),
            _ => return (FeedStatus::Ok, Some(macro_feed::bundled_macro())),
        };

        let parsed = match self.fetch(FeedId::MacroSeries, &url).await {
            Ok(body) => macro_feed::parse_macro(&body),
            Err(error) => Err(error),
        };

        match parsed {
            Ok(set) => (FeedStatus::Ok, Some(set)),
            Err(error) => {
                tracing::warn!(feed = %FeedId::MacroSeries, %error, "feed degraded");
                warnings.push(format!("macro feed degraded: {error}"));
                (FeedStatus::degraded(&error), None)
            }
        }
    }

    async fn load_sentiment(&self, warnings: &mut Vec<String>) -> SentimentSection {
        let parsed = if self.config.offline {
            sentiment::parse_sentiment(sentiment::OFFLINE_SENTIMENT)
        } else {
            match self.fetch(FeedId::Sentiment, sentiment::ENDPOINT).await {
                Ok(body) => sentiment::parse_sentiment(&body),
                Err(error) => Err(error),
            }
        };

        match parsed {
            Ok(reading) => SentimentSection {
                status: FeedStatus::Ok,
                reading: Some(reading),
            },
            Err(error) => {
                tracing::warn!(feed = %FeedId::Sentiment, %error, "feed degraded");
                warnings.push(format!("sentiment feed degraded: {error}"));
                SentimentSection {
                    status: FeedStatus::degraded(&error),
                    reading: None,
                }
            }
        }
    }

    async fn load_whale(&self, warnings: &mut Vec<String>) -> WhaleSection {
        if self.config.offline {
            return WhaleSection {
                status: FeedStatus::NoData,
                transfers: Vec::new(),
            };
        }

        let parsed = match self.fetch(FeedId::Whale, &self.config.whale_url).await {
            Ok(body) => whale::parse_transfers(&body),
            Err(error) => Err(error),
        };

        // The whale section reads "no data" on any upstream problem; it is
        // informational and never degrades the cycle further.
        match parsed {
            Ok(transfers) if !transfers.is_empty() => WhaleSection {
                status: FeedStatus::Ok,
                transfers,
            },
            Ok(_) => WhaleSection {
                status: FeedStatus::NoData,
                transfers: Vec::new(),
            },
            Err(error) => {
                tracing::debug!(feed = %FeedId::Whale, %error, "transfer feed has no data");
                warnings.push(format!("transfer feed has no data: {error}"));
                WhaleSection {
                    status: FeedStatus::NoData,
                    transfers: Vec::new(),
                }
            }
        }
    }

    async fn fetch(&self, feed: FeedId, url: &str) -> Result<String, FeedError> {
        tracing::debug!(feed = %feed, url, "fetching feed");
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = self.http.execute(request).await.map_err(|error| {
            if error.is_timeout() {
                FeedError::timeout(self.config.timeout_ms)
            } else {
                FeedError::unavailable(error.message().to_owned())
            }
        })?;

        if !response.is_success() {
            return Err(FeedError::non_success_status(response.status));
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_parsing() {
        assert_eq!("Radar".parse::<Section>(), Ok(Section::Radar));
        assert!(matches!(
            "events".parse::<Section>(),
            Err(ValidationError::InvalidSection { .. })
        ));
    }

    #[test]
    fn section_set_from_list() {
        let set = SectionSet::from_sections(&[Section::Whale]);
        assert!(!set.radar);
        assert!(!set.sentiment);
        assert!(set.whale);
    }

    #[test]
    fn default_config_tracks_full_portfolio() {
        let config = CycleConfig::default();
        assert_eq!(config.portfolio.len(), DEFAULT_PORTFOLIO.len());
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.offline);
        assert!(config.macro_url.is_none());
    }
}
