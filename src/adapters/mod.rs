// Adapters layer: concrete implementations for external systems (http, browser, output).

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;
pub mod output;

use crate::domain::model::FetchStrategy;
use crate::domain::ports::{ConfigProvider, HtmlFetcher};
use crate::utils::error::Result;

/// Build the fetcher matching the configured strategy.
pub fn build_fetcher<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn HtmlFetcher>> {
    match config.strategy() {
        FetchStrategy::Static => Ok(Box::new(http::HttpFetcher::from_config(config)?)),
        #[cfg(feature = "browser")]
        FetchStrategy::Rendered => Ok(Box::new(browser::BrowserFetcher::from_config(config))),
        #[cfg(not(feature = "browser"))]
        FetchStrategy::Rendered => Err(crate::utils::error::ScrapeError::InvalidConfigValueError {
            field: "strategy".to_string(),
            value: FetchStrategy::Rendered.to_string(),
            reason: "this build was compiled without the `browser` feature".to_string(),
        }),
    }
}
