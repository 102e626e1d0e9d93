use crate::domain::model::SelectorConfig;

pub const TARGET_URL: &str = "https://www.cypressmountain.com/mountain-report";

pub const CONTAINER_SELECTOR: &str = r#"section[data-name="liftStatus"]"#;
pub const ROW_SELECTOR: &str = "li";
pub const NAME_SELECTOR: &str = "p";
pub const STATUS_SELECTOR: &str = "img";
pub const STATUS_ATTRIBUTE: &str = "alt";

pub const TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            container: CONTAINER_SELECTOR.to_string(),
            row: ROW_SELECTOR.to_string(),
            name: NAME_SELECTOR.to_string(),
            status: STATUS_SELECTOR.to_string(),
            status_attribute: STATUS_ATTRIBUTE.to_string(),
            allowed_statuses: Vec::new(),
            wait_for: None,
        }
    }
}
