use crate::core::extractor;
use crate::core::fetcher::PageFetcher;
use crate::domain::model::{page_numbers, page_url, Record};
use std::time::Duration;

pub const DEFAULT_START_PAGE: usize = 1;
pub const DEFAULT_PAGE_COUNT: usize = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
pub const MAX_START_PAGE: usize = 100_000;
pub const MAX_PAGE_COUNT: usize = 1_000;

/// Walks the numbered pages of one site until a page is empty or has no listings.
#[derive(Debug, Clone)]
pub struct SiteWalker {
    fetcher: PageFetcher,
    delay: Duration,
}

impl SiteWalker {
    pub fn new(fetcher: PageFetcher, delay: Duration) -> Self {
        Self { fetcher, delay }
    }

    pub async fn walk(&self, url_template: &str, start_page: usize, page_count: usize) -> Vec<Record> {
        let mut collected = Vec::new();

        for page in page_numbers(start_page, page_count) {
            let url = page_url(url_template, page);
            tracing::debug!("Fetching page {}: {}", page, url);

            let html = self.fetcher.fetch(&url).await;
            if html.is_empty() {
                tracing::info!("No content at {}, stopping", url);
                break;
            }

            let page_records = extractor::extract(&html);
            if page_records.is_empty() {
                tracing::info!("No listings on {}, stopping", url);
                break;
            }

            tracing::debug!("Extracted {} records from {}", page_records.len(), url);
            collected.extend(page_records);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        collected
    }
}
