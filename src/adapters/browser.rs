//! Rendered fetch through a headless Chromium driven by chromiumoxide.
//!
//! Every call launches its own browser and closes it before returning, so no
//! session state survives between runs.

use crate::domain::model::FetchStrategy;
use crate::domain::ports::{ConfigProvider, HtmlFetcher};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn browser_error(e: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::BrowserError {
        message: e.to_string(),
    }
}

pub struct BrowserFetcher {
    wait_for: String,
    timeout: Duration,
    user_agent: Option<String>,
    chrome_path: Option<PathBuf>,
}

impl BrowserFetcher {
    /// `wait_for` is the CSS selector that must appear before the DOM is captured.
    pub fn new(wait_for: impl Into<String>, timeout: Duration) -> Self {
        Self {
            wait_for: wait_for.into(),
            timeout,
            user_agent: None,
            chrome_path: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_chrome_path(mut self, chrome_path: Option<PathBuf>) -> Self {
        self.chrome_path = chrome_path;
        self
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let selectors = config.selectors();
        Self::new(
            selectors.wait_for(),
            Duration::from_secs(config.timeout_seconds()),
        )
        .with_user_agent(config.user_agent())
        .with_chrome_path(config.chrome_path())
    }

    pub fn wait_for(&self) -> &str {
        &self.wait_for
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking");

        if let Some(user_agent) = &self.user_agent {
            builder = builder.arg(format!("--user-agent={}", user_agent));
        }
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| browser_error(format!("failed to build browser config: {e}")))
    }

    async fn render(&self, browser: &Browser, url: &str) -> Result<String> {
        tracing::debug!("Navigating headless browser to: {}", url);
        let page = browser.new_page(url).await.map_err(browser_error)?;

        self.wait_for_marker(&page).await?;

        let html = page.content().await.map_err(browser_error)?;
        tracing::debug!("Captured {} bytes of rendered HTML", html.len());
        Ok(html)
    }

    async fn wait_for_marker(&self, page: &Page) -> Result<()> {
        tracing::debug!("Waiting for '{}' to appear", self.wait_for);
        let poll = async {
            while page.find_element(self.wait_for.as_str()).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(self.timeout, poll)
            .await
            .map_err(|_| ScrapeError::TimeoutError {
                what: format!("selector '{}'", self.wait_for),
                seconds: self.timeout.as_secs(),
            })
    }
}

#[async_trait]
impl HtmlFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let config = self.browser_config()?;
        let (mut browser, mut handler) = Browser::launch(config).await.map_err(browser_error)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        let result = self.render(&browser, url).await;

        // the browser is released on every path, success or not
        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!("Failed to reap browser process: {}", e);
        }
        handler_task.abort();

        result
    }

    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::Rendered
    }
}
