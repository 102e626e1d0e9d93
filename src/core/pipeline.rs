use crate::adapters::build_fetcher;
use crate::core::extractor::LiftExtractor;
use crate::core::{reporter, ConfigProvider, HtmlFetcher, LiftStatus, OutputSink, Pipeline, ScrapeReport};
use crate::utils::error::Result;

pub struct LiftPipeline<S: OutputSink, C: ConfigProvider> {
    sink: S,
    config: C,
    fetcher: Box<dyn HtmlFetcher>,
    extractor: LiftExtractor,
}

impl<S: OutputSink, C: ConfigProvider> LiftPipeline<S, C> {
    /// Build a pipeline using the fetch strategy named by the configuration.
    pub fn new(sink: S, config: C) -> Result<Self> {
        let fetcher = build_fetcher(&config)?;
        Self::with_fetcher(sink, config, fetcher)
    }

    pub fn with_fetcher(sink: S, config: C, fetcher: Box<dyn HtmlFetcher>) -> Result<Self> {
        let extractor = LiftExtractor::new(&config.selectors())?;
        tracing::debug!(
            "Pipeline ready: strategy={}, format={}",
            fetcher.strategy(),
            config.report_format()
        );

        Ok(Self {
            sink,
            config,
            fetcher,
            extractor,
        })
    }
}

#[async_trait::async_trait]
impl<S: OutputSink, C: ConfigProvider> Pipeline for LiftPipeline<S, C> {
    fn source_url(&self) -> &str {
        self.config.target_url()
    }

    async fn fetch(&self) -> Result<String> {
        self.fetcher.fetch(self.config.target_url()).await
    }

    async fn extract(&self, html: String) -> Result<Vec<LiftStatus>> {
        Ok(self.extractor.extract(&html))
    }

    async fn report(&self, report: ScrapeReport) -> Result<String> {
        let rendered = reporter::render(&report, self.config.report_format())?;
        self.sink.write_report(rendered.as_bytes()).await?;
        Ok(self.sink.describe())
    }
}
