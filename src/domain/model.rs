use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used when a row carries no name element.
pub const UNKNOWN_LIFT: &str = "Unknown Lift";

/// Status used when a row carries no usable status image.
pub const UNKNOWN_STATUS: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftStatus {
    pub name: String,
    pub status: String,
}

impl LiftStatus {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

impl fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lift: {}, Status: {}", self.name, self.status)
    }
}

/// Everything the reporter needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub lifts: Vec<LiftStatus>,
}

impl ScrapeReport {
    pub fn new(source_url: impl Into<String>, lifts: Vec<LiftStatus>) -> Self {
        Self {
            source_url: source_url.into(),
            scraped_at: Utc::now(),
            lifts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// Plain HTTP GET of the raw page
    #[default]
    Static,
    /// Headless browser render before capture
    Rendered,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Static => write!(f, "static"),
            FetchStrategy::Rendered => write!(f, "rendered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// CSS locators for the lift list.
///
/// `status` picks candidate elements, `status_attribute` names the attribute
/// holding the status text. When `allowed_statuses` is non-empty only those
/// values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub container: String,
    pub row: String,
    pub name: String,
    pub status: String,
    pub status_attribute: String,
    pub allowed_statuses: Vec<String>,
    /// Marker awaited in rendered mode; falls back to `container`.
    pub wait_for: Option<String>,
}

impl SelectorConfig {
    pub fn wait_for(&self) -> &str {
        self.wait_for.as_deref().unwrap_or(&self.container)
    }
}
