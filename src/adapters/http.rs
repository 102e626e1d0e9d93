use crate::domain::model::FetchStrategy;
use crate::domain::ports::{ConfigProvider, HtmlFetcher};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Static fetch: one GET, body returned verbatim.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_seconds()),
            config.user_agent(),
        )
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Making HTTP request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes of HTML", body.len());
        Ok(body)
    }

    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::Static
    }
}
