use crate::core::Pipeline;
use crate::domain::model::{LiftStatus, ScrapeReport};
use std::time::Instant;

/// What a single run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub lifts: Vec<LiftStatus>,
    /// False when the fetch stage failed and extraction ran on an empty document.
    pub fetched: bool,
    /// Where the report went, if it was written.
    pub destination: Option<String>,
}

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Fetch, extract, report. Every stage failure is logged and degrades to
    /// "report what we have", so a run always completes.
    pub async fn run(&self) -> ScrapeOutcome {
        let started = Instant::now();
        let source_url = self.pipeline.source_url().to_string();

        tracing::info!("🚀 Fetching mountain report from: {}", source_url);
        let (html, fetched) = match self.pipeline.fetch().await {
            Ok(html) => (html, true),
            Err(e) => {
                tracing::error!(
                    "❌ Fetch failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                (String::new(), false)
            }
        };

        let lifts = match self.pipeline.extract(html).await {
            Ok(lifts) => lifts,
            Err(e) => {
                tracing::error!("❌ Extraction failed: {}", e);
                Vec::new()
            }
        };
        tracing::info!("🔄 Extracted {} lifts", lifts.len());

        let report = ScrapeReport::new(source_url, lifts.clone());
        let destination = match self.pipeline.report(report).await {
            Ok(destination) => {
                tracing::debug!("📁 Report written to: {}", destination);
                Some(destination)
            }
            Err(e) => {
                tracing::error!("❌ Failed to write report: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                None
            }
        };

        tracing::info!("✅ Scrape finished in {:?}", started.elapsed());

        ScrapeOutcome {
            lifts,
            fetched,
            destination,
        }
    }
}
