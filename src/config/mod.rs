pub mod toml_config;

use crate::domain::model::ValidationRules;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "capstan", about = "Relay records through pluggable backend providers")
)]
pub struct CliConfig {
    /// TOML configuration file. Values from the file win over flag defaults.
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// JSON file holding an array of records to relay.
    #[cfg_attr(feature = "cli", arg(long))]
    pub input: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "memory"))]
    pub store: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "log"))]
    pub channel: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "accept"))]
    pub validator: String,

    /// Target URL for the `http` channel.
    #[cfg_attr(feature = "cli", arg(long))]
    pub endpoint: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./data"))]
    pub data_dir: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "id"))]
    pub key_field: String,

    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub required_fields: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "30"))]
    pub timeout_seconds: u64,

    /// Run the capability probe instead of a relay.
    #[cfg_attr(feature = "cli", arg(long))]
    pub probe: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn store_provider(&self) -> &str {
        &self.store
    }

    fn channel_provider(&self) -> &str {
        &self.channel
    }

    fn validator_provider(&self) -> &str {
        &self.validator
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn key_field(&self) -> &str {
        &self.key_field
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            required_fields: self.required_fields.clone(),
            patterns: HashMap::new(),
            max_field_length: None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("store", &self.store)?;
        validate_non_empty_string("channel", &self.channel)?;
        validate_non_empty_string("validator", &self.validator)?;
        validate_non_empty_string("key_field", &self.key_field)?;
        validate_path("data_dir", &self.data_dir)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;

        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }

        Ok(())
    }
}
