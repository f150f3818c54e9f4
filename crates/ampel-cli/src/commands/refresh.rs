use std::sync::Arc;

use ampel_core::pipeline::{CycleConfig, SectionSet};
use ampel_core::{Refresher, ReqwestHttpClient, Section};

use crate::cli::{Cli, RefreshArgs};
use crate::error::CliError;

use super::CommandOutput;

pub async fn run(cli: &Cli, args: &RefreshArgs) -> Result<CommandOutput, CliError> {
    let mut config = CycleConfig {
        timeout_ms: cli.timeout_ms,
        offline: cli.offline,
        shape: args.shape.into(),
        macro_url: args.macro_url.clone(),
        ..CycleConfig::default()
    };

    if !args.coins.is_empty() {
        config.portfolio = args.coins.clone();
    }
    if !args.sections.is_empty() {
        let sections: Vec<Section> = args.sections.iter().map(|s| Section::from(*s)).collect();
        config.sections = SectionSet::from_sections(&sections);
    }
    if let Some(whale_url) = &args.whale_url {
        config.whale_url = whale_url.clone();
    }

    let refresher = Refresher::new(Arc::new(ReqwestHttpClient::new()), config);
    let report = refresher.run().await;

    Ok(CommandOutput::Report(Box::new(report)))
}
