use clap::Parser;
use firm_scraper::utils::logger::{self, LogFormat};
use firm_scraper::utils::validation::Validate;
use firm_scraper::{CliConfig, ListingPipeline, LocalStorage, RunOutcome, ScrapeEngine, ScrapeError};

fn exit_with(e: &ScrapeError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(if config.verbose { "debug" } else { "info" }, format);

    tracing::info!("Starting firm-scraper");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e, "Configuration validation failed");
    }

    let pipeline = match ListingPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e, "Failed to set up scraper"),
    };
    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(RunOutcome::Saved { path, records }) => {
            println!("Saved {} records to {}", records, path);
        }
        Ok(RunOutcome::NoData) => {
            println!("No data scraped.");
        }
        Err(e) => exit_with(&e, "Scrape failed"),
    }

    Ok(())
}
