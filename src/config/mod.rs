#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod toml_config;

use crate::domain::model::SelectorConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

impl Validate for SelectorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_selector("selectors.container", &self.container)?;
        validation::validate_selector("selectors.row", &self.row)?;
        validation::validate_selector("selectors.name", &self.name)?;
        validation::validate_selector("selectors.status", &self.status)?;
        validation::validate_non_empty_string("selectors.status_attribute", &self.status_attribute)?;
        if let Some(wait_for) = &self.wait_for {
            validation::validate_selector("selectors.wait_for", wait_for)?;
        }
        Ok(())
    }
}
