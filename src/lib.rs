pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{engine::ScrapeEngine, pipeline::ListingPipeline};
pub use domain::model::{Record, RunOutcome, Site};
pub use utils::error::{Result, ScrapeError};
