pub mod dedupe;
pub mod engine;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod report;
pub mod walker;

pub use crate::domain::model::{DedupeResult, Record, RunOutcome, RunSummary, Site};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
