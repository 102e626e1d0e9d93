pub mod engine;
pub mod extractor;
pub mod pipeline;
pub mod reporter;

pub use crate::domain::model::{LiftStatus, ScrapeReport};
pub use crate::domain::ports::{ConfigProvider, HtmlFetcher, OutputSink, Pipeline};
pub use crate::utils::error::Result;
