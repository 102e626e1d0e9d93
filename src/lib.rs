pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::output::{FileSink, StdoutSink};
pub use config::toml_config::TomlConfig;
pub use core::{engine::ScrapeEngine, extractor::LiftExtractor, pipeline::LiftPipeline};
pub use domain::model::{LiftStatus, UNKNOWN_LIFT, UNKNOWN_STATUS};
pub use utils::error::{Result, ScrapeError};
