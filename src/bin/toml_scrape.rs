use anyhow::Context;
use clap::Parser;
use firm_scraper::core::ConfigProvider;
use firm_scraper::utils::{logger, validation::Validate};
use firm_scraper::{ListingPipeline, LocalStorage, RunOutcome, ScrapeEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-scrape")]
#[command(about = "Scrape firm listings using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "scraper.toml")]
    config: String,

    /// Override the page count from config
    #[arg(long)]
    pages: Option<usize>,

    /// Override the output path from config
    #[arg(long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - list the URLs that would be requested without fetching
    #[arg(long)]
    dry_run: bool,
}

fn load_config(args: &Args) -> anyhow::Result<TomlConfig> {
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if let Some(pages) = args.pages {
        config.scraper.pages = Some(pages);
    }
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }

    Ok(config)
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration summary:");
    tracing::info!(
        "   Pages per site: {} (starting at {})",
        config.pages(),
        config.start_page()
    );
    tracing::info!("   Delay between pages: {:?}", config.delay());
    tracing::info!("   Output: {}", config.output_path());
    for site in config.sites() {
        tracing::info!("   Site {}: {}", site.name, site.url_template);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let format = config.log_format().unwrap_or_default();
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level()
    };
    logger::init_logger(&level, format);

    tracing::info!("🚀 Starting TOML-based firm scraper");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be made");
        for (site, url) in config.planned_urls() {
            println!("{}\t{}", site, url);
        }
        return Ok(());
    }

    let pipeline = match ListingPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    let engine = ScrapeEngine::new(pipeline);

    match engine.run_with_summary().await {
        Ok((outcome, summary)) => {
            match outcome {
                RunOutcome::Saved { path, records } => {
                    println!("Saved {} records to {}", records, path)
                }
                RunOutcome::NoData => println!("No data scraped."),
            }
            tracing::info!(
                "📊 {} scraped, {} duplicates removed, took {} ms",
                summary.scraped_records,
                summary.duplicates_removed(),
                summary.elapsed().num_milliseconds()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
