use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches listing pages. Failures are logged and turned into an empty body.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Returns the page body, or an empty string on any transport error or non-2xx status.
    pub async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        tracing::debug!("Response status for {}: {}", url, response.status());
        response.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/list")
                .header("user-agent", "Mozilla/5.0");
            then.status(200).body("<html>ok</html>");
        });

        let fetcher = PageFetcher::with_defaults().unwrap();
        let body = fetcher.fetch(&server.url("/list")).await;

        page_mock.assert();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_empty() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not here");
        });

        let fetcher = PageFetcher::with_defaults().unwrap();
        let body = fetcher.fetch(&server.url("/missing")).await;

        page_mock.assert();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .body("late")
                .delay(Duration::from_millis(500));
        });

        let fetcher = PageFetcher::new(DEFAULT_USER_AGENT, Duration::from_millis(50)).unwrap();
        let body = fetcher.fetch(&server.url("/slow")).await;

        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_empty() {
        let fetcher = PageFetcher::with_defaults().unwrap();
        // 保留埠，不會有服務監聽
        let body = fetcher.fetch("http://127.0.0.1:9/listing").await;
        assert!(body.is_empty());
    }
}
