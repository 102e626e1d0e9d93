use crate::config::defaults;
use crate::core::ConfigProvider;
use crate::domain::model::{FetchStrategy, ReportFormat, SelectorConfig};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Required; may also come from `--url`.
    pub url: Option<String>,
    pub strategy: Option<FetchStrategy>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub chrome_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
    pub output_path: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` placeholders with environment values. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.report.output_path.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn target_url(&self) -> &str {
        self.source.url.as_deref().unwrap_or_default()
    }

    fn strategy(&self) -> FetchStrategy {
        self.source.strategy.unwrap_or_default()
    }

    fn selectors(&self) -> SelectorConfig {
        self.selectors.clone()
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(defaults::TIMEOUT_SECONDS)
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    fn chrome_path(&self) -> Option<PathBuf> {
        self.source.chrome_path.clone()
    }

    fn report_format(&self) -> ReportFormat {
        self.report.format.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let url = validation::validate_required_field("source.url", &self.source.url)?;
        validation::validate_url("source.url", url)?;
        validation::validate_range(
            "source.timeout_seconds",
            self.timeout_seconds(),
            1,
            defaults::MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_non_empty_string("source.user_agent", self.user_agent())?;
        if let Some(output) = self.output_path() {
            validation::validate_path("report.output_path", output)?;
        }
        self.selectors.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = r#"
[source]
url = "https://www.cypressmountain.com/mountain-report"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.strategy(), FetchStrategy::Static);
        assert_eq!(config.timeout_seconds(), defaults::TIMEOUT_SECONDS);
        assert_eq!(config.selectors, SelectorConfig::default());
        assert_eq!(config.report_format(), ReportFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r##"
[source]
url = "https://example.com/report"
strategy = "rendered"
timeout_seconds = 45

[selectors]
container = "#lift-status"
row = "div[class*='lift-row']"
name = "div.name"
allowed_statuses = ["Open", "Closed"]

[report]
format = "csv"
output_path = "./out/lifts.csv"
"##;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.strategy(), FetchStrategy::Rendered);
        assert_eq!(config.timeout_seconds(), 45);
        assert_eq!(config.selectors.container, "#lift-status");
        assert_eq!(config.selectors.row, "div[class*='lift-row']");
        // unspecified selectors keep their defaults
        assert_eq!(config.selectors.status, defaults::STATUS_SELECTOR);
        assert_eq!(config.selectors.allowed_statuses, vec!["Open", "Closed"]);
        assert_eq!(config.report_format(), ReportFormat::Csv);
        assert_eq!(config.output_path(), Some("./out/lifts.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LIFT_SCRAPER_TEST_URL", "https://test.example.com/report");

        let toml_content = r#"
[source]
url = "${LIFT_SCRAPER_TEST_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.url.as_deref(),
            Some("https://test.example.com/report")
        );

        std::env::remove_var("LIFT_SCRAPER_TEST_URL");
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let toml_content = r#"
[source]
url = "https://example.com"
strategy = "carrier-pigeon"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, ScrapeError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[source]
url = "https://example.com"

[selectors]
row = "li[class*="
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScrapeError::SelectorError { .. })
        ));
    }

    #[test]
    fn test_missing_url_is_reported() {
        let toml_content = r#"
[source]
strategy = "static"

[report]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        match config.validate() {
            Err(ScrapeError::MissingConfigError { field }) => assert_eq!(field, "source.url"),
            other => panic!("expected MissingConfigError, got {:?}", other),
        }

        let config = TomlConfig::from_toml_str("[report]\nformat = \"text\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScrapeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
url = "https://example.com/report"

[report]
format = "json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target_url(), "https://example.com/report");
        assert_eq!(config.report_format(), ReportFormat::Json);
    }
}
