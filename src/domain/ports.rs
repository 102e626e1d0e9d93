use crate::domain::model::{FetchStrategy, LiftStatus, ReportFormat, ScrapeReport, SelectorConfig};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Destination for the rendered report.
pub trait OutputSink: Send + Sync {
    fn write_report(&self, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human-readable description of where the report went.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn strategy(&self) -> FetchStrategy;
    fn selectors(&self) -> SelectorConfig;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
    fn chrome_path(&self) -> Option<PathBuf>;
    fn report_format(&self) -> ReportFormat;
}

/// Retrieves an HTML document for a URL.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;

    fn strategy(&self) -> FetchStrategy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn source_url(&self) -> &str;
    async fn fetch(&self) -> Result<String>;
    async fn extract(&self, html: String) -> Result<Vec<LiftStatus>>;
    async fn report(&self, report: ScrapeReport) -> Result<String>;
}
