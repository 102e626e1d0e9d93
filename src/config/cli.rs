use crate::config::defaults;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::{FetchStrategy, ReportFormat, SelectorConfig};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lift-scraper")]
#[command(about = "Scrape ski-lift statuses from a mountain report page")]
pub struct CliConfig {
    /// Mountain report page to scrape [default: the Cypress Mountain report]
    #[arg(long)]
    pub url: Option<String>,

    /// How to retrieve the page [default: static]
    #[arg(long, value_enum)]
    pub strategy: Option<FetchStrategy>,

    #[command(flatten)]
    pub selectors: SelectorArgs,

    /// Request timeout, also bounds the rendered-mode marker wait [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// User-Agent header sent by the static fetcher and the browser
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Chrome/Chromium executable for rendered mode (auto-detected if omitted)
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Load source, selectors and report settings from a TOML file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SelectorArgs {
    /// CSS selector of the element holding the lift list [default: section[data-name="liftStatus"]]
    #[arg(long)]
    pub container: Option<String>,

    /// CSS selector of one lift row, relative to the container [default: li]
    #[arg(long)]
    pub row: Option<String>,

    /// CSS selector of the lift name, relative to a row [default: p]
    #[arg(long)]
    pub name: Option<String>,

    /// CSS selector of the status image, relative to a row [default: img]
    #[arg(long)]
    pub status: Option<String>,

    /// Attribute of the status image carrying the status text [default: alt]
    #[arg(long)]
    pub status_attribute: Option<String>,

    /// Only accept these status values, e.g. "Open,Closed"
    #[arg(long, value_delimiter = ',')]
    pub allowed_statuses: Vec<String>,

    /// Marker to wait for in rendered mode [default: the container selector]
    #[arg(long)]
    pub wait_for: Option<String>,
}

impl SelectorArgs {
    /// Overwrite the selectors that were given on the command line.
    pub fn apply_to(&self, selectors: &mut SelectorConfig) {
        if let Some(container) = &self.container {
            selectors.container = container.clone();
        }
        if let Some(row) = &self.row {
            selectors.row = row.clone();
        }
        if let Some(name) = &self.name {
            selectors.name = name.clone();
        }
        if let Some(status) = &self.status {
            selectors.status = status.clone();
        }
        if let Some(attribute) = &self.status_attribute {
            selectors.status_attribute = attribute.clone();
        }
        if !self.allowed_statuses.is_empty() {
            selectors.allowed_statuses = self.allowed_statuses.clone();
        }
        if let Some(wait_for) = &self.wait_for {
            selectors.wait_for = Some(wait_for.clone());
        }
    }
}

impl CliConfig {
    /// Layer the flags that were given on top of a TOML base configuration.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(url) = &self.url {
            config.source.url = Some(url.clone());
            tracing::info!("🔧 URL overridden to: {}", url);
        }
        if let Some(strategy) = self.strategy {
            config.source.strategy = Some(strategy);
            tracing::info!("🔧 Fetch strategy overridden to: {}", strategy);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            config.source.user_agent = Some(user_agent.clone());
        }
        if let Some(chrome_path) = &self.chrome_path {
            config.source.chrome_path = Some(chrome_path.clone());
        }
        self.selectors.apply_to(&mut config.selectors);
        if let Some(format) = self.format {
            config.report.format = Some(format);
        }
        if let Some(output) = &self.output {
            config.report.output_path = Some(output.clone());
        }
    }
}

impl ConfigProvider for CliConfig {
    fn target_url(&self) -> &str {
        self.url.as_deref().unwrap_or(defaults::TARGET_URL)
    }

    fn strategy(&self) -> FetchStrategy {
        self.strategy.unwrap_or_default()
    }

    fn selectors(&self) -> SelectorConfig {
        let mut selectors = SelectorConfig::default();
        self.selectors.apply_to(&mut selectors);
        selectors
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(defaults::TIMEOUT_SECONDS)
    }

    fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    fn chrome_path(&self) -> Option<PathBuf> {
        self.chrome_path.clone()
    }

    fn report_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("url", self.target_url())?;
        validation::validate_range(
            "timeout_seconds",
            self.timeout_seconds(),
            1,
            defaults::MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_non_empty_string("user_agent", self.user_agent())?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        self.selectors().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        let config = CliConfig::parse_from(["lift-scraper"]);

        assert_eq!(config.target_url(), defaults::TARGET_URL);
        assert_eq!(config.strategy(), FetchStrategy::Static);
        assert_eq!(config.report_format(), ReportFormat::Text);
        assert_eq!(config.selectors(), SelectorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_selector_and_strategy_flags() {
        let config = CliConfig::parse_from([
            "lift-scraper",
            "--strategy",
            "rendered",
            "--container",
            "#lift-status",
            "--allowed-statuses",
            "Open,Closed",
            "--format",
            "json",
        ]);

        let selectors = config.selectors();
        assert_eq!(config.strategy(), FetchStrategy::Rendered);
        assert_eq!(config.report_format(), ReportFormat::Json);
        assert_eq!(selectors.container, "#lift-status");
        assert_eq!(selectors.wait_for(), "#lift-status");
        assert_eq!(selectors.allowed_statuses, vec!["Open", "Closed"]);
    }

    #[test]
    fn test_flags_override_toml_base() {
        let mut config = TomlConfig::from_toml_str(
            r##"
[source]
url = "https://example.com/report"
timeout_seconds = 45

[selectors]
container = "#lift-status"
row = "li"
allowed_statuses = ["Open", "Closed"]

[report]
format = "csv"
"##,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "lift-scraper",
            "--url",
            "https://other.example.com/report",
            "--row",
            "div.lift",
            "--timeout-seconds",
            "10",
            "--user-agent",
            "lift-scraper-test",
            "--chrome-path",
            "/opt/chromium/chrome",
        ]);
        cli.apply_overrides(&mut config);

        assert_eq!(config.target_url(), "https://other.example.com/report");
        assert_eq!(config.selectors.row, "div.lift");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.user_agent(), "lift-scraper-test");
        assert_eq!(
            config.chrome_path(),
            Some(PathBuf::from("/opt/chromium/chrome"))
        );
        // flags that were not given leave the file's values alone
        assert_eq!(config.selectors.container, "#lift-status");
        assert_eq!(config.selectors.allowed_statuses, vec!["Open", "Closed"]);
        assert_eq!(config.report_format(), ReportFormat::Csv);
    }

    #[test]
    fn test_invalid_selector_fails_validation() {
        let config = CliConfig::parse_from(["lift-scraper", "--row", "li[class*="]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_out_of_range_fails_validation() {
        let config = CliConfig::parse_from(["lift-scraper", "--timeout-seconds", "0"]);
        assert!(config.validate().is_err());
    }
}
