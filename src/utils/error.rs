use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Browser automation failed: {message}")]
    BrowserError { message: String },

    #[error("Timed out after {seconds}s waiting for {what}")]
    TimeoutError { what: String, seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Browser,
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::HttpError(_)
            | ScrapeError::HttpStatusError { .. }
            | ScrapeError::TimeoutError { .. } => ErrorCategory::Network,
            ScrapeError::BrowserError { .. } => ErrorCategory::Browser,
            ScrapeError::IoError(_) => ErrorCategory::Io,
            ScrapeError::SerializationError(_) | ScrapeError::CsvError(_) => ErrorCategory::Data,
            ScrapeError::SelectorError { .. }
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Browser => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::HttpError(_) => "Check network connectivity and that the URL is reachable",
            ScrapeError::HttpStatusError { .. } => {
                "The site rejected the request; verify the URL or try again later"
            }
            ScrapeError::BrowserError { .. } => {
                "Make sure Chrome/Chromium is installed, or pass --chrome-path"
            }
            ScrapeError::TimeoutError { .. } => {
                "Increase --timeout-seconds or check that --wait-for matches the page"
            }
            ScrapeError::IoError(_) => "Check file permissions and available disk space",
            ScrapeError::SerializationError(_) | ScrapeError::CsvError(_) => {
                "Try the plain text report format"
            }
            ScrapeError::SelectorError { .. } => "Fix the CSS selector syntax in your configuration",
            ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::HttpError(_) | ScrapeError::HttpStatusError { .. } => {
                format!("Could not download the mountain report: {}", self)
            }
            ScrapeError::BrowserError { .. } | ScrapeError::TimeoutError { .. } => {
                format!("Could not render the mountain report: {}", self)
            }
            ScrapeError::SelectorError { .. }
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = ScrapeError::SelectorError {
            selector: "li[".to_string(),
            message: "unexpected end of input".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_http_status_error_is_network_category() {
        let err = ScrapeError::HttpStatusError {
            status: 503,
            url: "https://example.com".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "HTTP 503 returned by https://example.com");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScrapeError = io.into();

        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
