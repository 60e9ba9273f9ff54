use crate::core::{Pipeline, RunOutcome, RunSummary};
use crate::utils::error::Result;
use chrono::Utc;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let (outcome, _) = self.run_with_summary().await?;
        Ok(outcome)
    }

    /// Extract → transform → load. Load is skipped when nothing was scraped.
    pub async fn run_with_summary(&self) -> Result<(RunOutcome, RunSummary)> {
        let started_at = Utc::now();

        let raw = self.pipeline.extract().await?;
        let scraped_records = raw.len();
        tracing::info!("Scraped {} records", scraped_records);

        let deduped = self.pipeline.transform(raw).await?;
        let unique_records = deduped.records.len();
        tracing::info!(
            "{} unique records ({} duplicates removed)",
            unique_records,
            deduped.duplicates_removed
        );

        let outcome = if deduped.records.is_empty() {
            tracing::info!("No data scraped.");
            RunOutcome::NoData
        } else {
            let path = self.pipeline.load(deduped).await?;
            tracing::info!("Saved {} records to {}", unique_records, path);
            RunOutcome::Saved {
                path,
                records: unique_records,
            }
        };

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            scraped_records,
            unique_records,
        };
        tracing::debug!(
            "Run finished at {} in {} ms",
            summary.finished_at.to_rfc3339(),
            summary.elapsed().num_milliseconds()
        );

        Ok((outcome, summary))
    }
}
