use crate::core::dedupe::dedupe;
use crate::core::fetcher::PageFetcher;
use crate::core::report::render_report;
use crate::core::walker::SiteWalker;
use crate::core::{ConfigProvider, DedupeResult, Pipeline, Record, Storage};
use crate::utils::error::Result;

/// Scrapes every configured site, dedupes, and writes the PDF report.
pub struct ListingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    walker: SiteWalker,
}

impl<S: Storage, C: ConfigProvider> ListingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = PageFetcher::new(config.user_agent(), config.request_timeout())?;
        let walker = SiteWalker::new(fetcher, config.delay());
        Ok(Self {
            storage,
            config,
            walker,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ListingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let mut all_records = Vec::new();

        for site in self.config.sites() {
            tracing::info!("Scraping {}...", site.name);
            let records = self
                .walker
                .walk(
                    &site.url_template,
                    self.config.start_page(),
                    self.config.pages(),
                )
                .await;
            tracing::info!("{}: {} records", site.name, records.len());
            all_records.extend(records);
        }

        Ok(all_records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<DedupeResult> {
        let result = dedupe(data);
        if result.duplicates_removed > 0 {
            tracing::debug!("Removed {} duplicate records", result.duplicates_removed);
        }
        Ok(result)
    }

    async fn load(&self, result: DedupeResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        let pdf = render_report(&result.records, self.config.report_title())?;
        tracing::debug!("Writing PDF ({} bytes) to {}", pdf.len(), output_path);
        self.storage.write_file(&output_path, &pdf).await?;

        Ok(output_path)
    }
}
