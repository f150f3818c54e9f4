mod feeds;
mod refresh;

use ampel_core::CycleReport;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use feeds::FeedListing;

/// Result of one command invocation, rendered by `output`.
pub enum CommandOutput {
    Report(Box<CycleReport>),
    Feeds(Vec<FeedListing>),
}

impl CommandOutput {
    /// Degraded sections plus warnings; nonzero fails `--strict`.
    pub fn strict_violations(&self) -> (usize, usize) {
        match self {
            Self::Report(report) => (report.degraded_sections(), report.meta.warnings.len()),
            Self::Feeds(_) => (0, 0),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Refresh(args) => refresh::run(cli, args).await,
        Command::Feeds => Ok(feeds::run()),
    }
}
