//! CLI argument definitions for ampel.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `refresh` | Run one aggregation cycle and print the report |
//! | `feeds` | List the upstream feeds and their endpoints |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Fail when any section is degraded |
//! | `--timeout-ms` | `10000` | Per-feed request timeout in ms |
//! | `--offline` | `false` | Use bundled payloads instead of the network |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market traffic light for a fixed crypto portfolio.
///
/// Aggregates live market data, macro indicators, and sentiment into a
/// single FAVORABLE/WATCH/CAUTION recommendation.
#[derive(Debug, Parser)]
#[command(name = "ampel", author, version, about = "Crypto market traffic light")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat degraded sections and warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Per-feed request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = ampel_core::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Use the bundled deterministic payloads instead of the network.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one aggregation cycle and print the traffic-light report.
    Refresh(RefreshArgs),
    /// List upstream feeds and their endpoints.
    Feeds,
}

#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// CoinGecko ids to track instead of the built-in portfolio.
    #[arg(long, value_delimiter = ',')]
    pub coins: Vec<String>,

    /// Optional sections to include. All are included when omitted.
    #[arg(long, value_delimiter = ',', value_enum)]
    pub sections: Vec<SectionArg>,

    /// Upstream price shape to consume.
    #[arg(long, value_enum, default_value_t = ShapeArg::Markets)]
    pub shape: ShapeArg,

    /// Macro endpoint serving parallel monthly arrays; bundled data when
    /// omitted.
    #[arg(long)]
    pub macro_url: Option<String>,

    /// Override the whale transfer feed endpoint.
    #[arg(long)]
    pub whale_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Radar,
    Sentiment,
    Whale,
}

impl From<SectionArg> for ampel_core::Section {
    fn from(value: SectionArg) -> Self {
        match value {
            SectionArg::Radar => Self::Radar,
            SectionArg::Sentiment => Self::Sentiment,
            SectionArg::Whale => Self::Whale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    Markets,
    SimplePrice,
}

impl From<ShapeArg> for ampel_core::MarketShape {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Markets => Self::Markets,
            ShapeArg::SimplePrice => Self::SimplePrice,
        }
    }
}
