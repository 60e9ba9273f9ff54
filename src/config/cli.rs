use crate::core::fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::core::report::DEFAULT_TITLE;
use crate::core::walker::{MAX_PAGE_COUNT, MAX_START_PAGE};
use crate::core::ConfigProvider;
use crate::domain::model::{default_sites, Site};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_OUTPUT: &str = "hyderabad_firms.pdf";

#[derive(Debug, Clone, Parser)]
#[command(name = "firm-scraper")]
#[command(about = "Scrape Hyderabad firm listings into a PDF report")]
pub struct CliConfig {
    #[arg(long, default_value = "3", help = "number of pages to scrape per site")]
    pub pages: usize,

    #[arg(long, default_value = "1", help = "first page number to request")]
    pub start_page: usize,

    #[arg(long, default_value = DEFAULT_OUTPUT, help = "output PDF filename")]
    pub output: String,

    #[arg(long, default_value = "1000", help = "pause between pages in milliseconds")]
    pub delay_ms: u64,

    #[arg(long, default_value = "10", help = "per-request timeout in seconds")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = DEFAULT_TITLE, help = "report title")]
    pub title: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(skip = DEFAULT_USER_AGENT.to_string())]
    pub user_agent: String,

    #[arg(skip = default_sites())]
    pub sites: Vec<Site>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pages: 3,
            start_page: 1,
            output: DEFAULT_OUTPUT.to_string(),
            delay_ms: 1000,
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            title: DEFAULT_TITLE.to_string(),
            verbose: false,
            json_logs: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sites: default_sites(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn pages(&self) -> usize {
        self.pages
    }

    fn start_page(&self) -> usize {
        self.start_page
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn report_title(&self) -> &str {
        &self.title
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("pages", self.pages, 1, MAX_PAGE_COUNT)?;
        validation::validate_range("start_page", self.start_page, 1, MAX_START_PAGE)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_sites("sites", &self.sites)?;
        Ok(())
    }
}
