use crate::domain::model::{DedupeResult, Record, Site};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn sites(&self) -> &[Site];
    fn pages(&self) -> usize;
    fn start_page(&self) -> usize;
    fn output_path(&self) -> &str;
    fn report_title(&self) -> &str;
    fn delay(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<DedupeResult>;
    async fn load(&self, result: DedupeResult) -> Result<String>;
}
