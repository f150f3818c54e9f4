use ampel_core::pipeline::{
    MacroSection, MarketSection, RadarSection, SentimentSection, WhaleSection,
};
use ampel_core::{CycleReport, FeedStatus};

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => render_json(output, pretty),
        OutputFormat::Table => {
            match output {
                CommandOutput::Report(report) => render_report(report),
                CommandOutput::Feeds(listings) => {
                    println!("{:<14} {:<44} {}", "FEED", "ENDPOINT", "OPTIONAL");
                    for listing in listings {
                        println!(
                            "{:<14} {:<44} {}",
                            listing.feed.as_str(),
                            listing.endpoint,
                            listing.optional
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

fn render_json(output: &CommandOutput, pretty: bool) -> Result<(), CliError> {
    let value = match output {
        CommandOutput::Report(report) => serde_json::to_value(report)?,
        CommandOutput::Feeds(listings) => serde_json::to_value(listings)?,
    };
    let payload = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{payload}");
    Ok(())
}

fn render_report(report: &CycleReport) {
    println!("cycle        : {}", report.meta.cycle_id);
    println!("generated_at : {}", report.meta.generated_at);
    println!("latency_ms   : {}", report.meta.latency_ms);
    println!("verdict      : {}", report.verdict.classification);
    println!(
        "reason       : {} of tracked coins in the red; macro risk {}/10",
        report.market.breadth, report.verdict.surfaced_score
    );
    println!();

    render_market(&report.market);
    render_macro(&report.macro_signal);
    if !report.sentiment.status.is_disabled() {
        render_sentiment(&report.sentiment);
    }
    if !report.radar.status.is_disabled() {
        render_radar(&report.radar);
    }
    if !report.whale.status.is_disabled() {
        render_whale(&report.whale);
    }

    if !report.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &report.meta.warnings {
            println!("  - {warning}");
        }
    }
}

fn render_market(section: &MarketSection) {
    println!(
        "market [{}] ({} coins, {} skipped)",
        status_label(&section.status),
        section.snapshots.len(),
        section.skipped
    );
    if section.snapshots.is_empty() {
        println!("  no market data this cycle");
    } else {
        println!(
            "  {:<28} {:>14} {:>9} {:>18} {:>16}",
            "COIN", "PRICE (USD)", "24H %", "MARKET CAP", "VOLUME 24H"
        );
        for snapshot in &section.snapshots {
            let change = snapshot
                .change_24h_pct
                .map_or_else(|| String::from("-"), |value| format!("{value:.2}"));
            println!(
                "  {:<28} {:>14.4} {:>9} {:>18.0} {:>16.0}",
                truncate(&snapshot.name, 28),
                snapshot.price_usd,
                change,
                snapshot.market_cap,
                snapshot.volume_24h
            );
        }
    }
    println!();
}

fn render_macro(section: &MacroSection) {
    let assessment = &section.assessment;
    println!("macro [{}]", status_label(&section.status));
    println!(
        "  score          : {} ({})",
        assessment.score,
        assessment.interpretation.as_str()
    );
    println!("  policy_rate    : {}", assessment.trends.policy_rate);
    println!("  inflation      : {}", assessment.trends.inflation);
    println!("  currency_index : {}", assessment.trends.currency_index);
    if !assessment.missing.is_empty() {
        let missing: Vec<&str> = assessment.missing.iter().map(|m| m.as_str()).collect();
        println!("  missing series : {}", missing.join(", "));
    }
    println!();
}

fn render_sentiment(section: &SentimentSection) {
    println!("sentiment [{}]", status_label(&section.status));
    match &section.reading {
        Some(reading) => println!(
            "  {} ({}) as of {}",
            reading.value, reading.classification, reading.as_of
        ),
        None => println!("  no sentiment reading this cycle"),
    }
    println!();
}

fn render_radar(section: &RadarSection) {
    println!("radar [{}]", status_label(&section.status));
    if section.records.is_empty() {
        println!("  no radar records this cycle");
    } else {
        println!(
            "  {:<10} {:>16} {:>14} {:>14}",
            "COIN", "VOLUME/MCAP", "SUPPLY USED %", "PRICE (USD)"
        );
        for record in &section.records {
            println!(
                "  {:<10} {:>16.3} {:>14.2} {:>14.4}",
                record.symbol, record.volume_ratio, record.supply_used_pct, record.price_usd
            );
        }
    }
    println!();
}

fn render_whale(section: &WhaleSection) {
    println!("whale transfers [{}]", status_label(&section.status));
    if section.transfers.is_empty() {
        println!("  no large transfers reported");
    } else {
        println!(
            "  {:<8} {:>18} {:>16}   {:<20} {:<20}",
            "COIN", "AMOUNT", "AMOUNT (USD)", "FROM", "TO"
        );
        for transfer in &section.transfers {
            println!(
                "  {:<8} {:>18.2} {:>16.0}   {:<20} {:<20}",
                transfer.coin_symbol,
                transfer.amount,
                transfer.amount_usd,
                truncate(&transfer.from_label, 20),
                truncate(&transfer.to_label, 20)
            );
        }
    }
    println!();
}

fn status_label(status: &FeedStatus) -> String {
    match status {
        FeedStatus::Degraded { code, .. } => format!("degraded: {code}"),
        other => other.label().to_owned(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}
