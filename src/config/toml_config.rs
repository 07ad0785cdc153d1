use crate::domain::model::ValidationRules;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CapError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub relay: RelaySection,
    pub store: StoreSection,
    pub channel: ChannelSection,
    #[serde(default)]
    pub validator: ValidatorSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySection {
    pub name: String,
    #[serde(default = "default_key_field")]
    pub key_field: String,
    pub input: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub provider: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSection {
    pub provider: String,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorSection {
    #[serde(default = "default_validator")]
    pub provider: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub patterns: HashMap<String, String>,
    pub max_field_length: Option<usize>,
}

impl Default for ValidatorSection {
    fn default() -> Self {
        Self {
            provider: default_validator(),
            required_fields: Vec::new(),
            patterns: HashMap::new(),
            max_field_length: None,
        }
    }
}

fn default_key_field() -> String {
    "id".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_validator() -> String {
    "accept".to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CapError::Io)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CapError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }
}

impl ConfigProvider for TomlConfig {
    fn store_provider(&self) -> &str {
        &self.store.provider
    }

    fn channel_provider(&self) -> &str {
        &self.channel.provider
    }

    fn validator_provider(&self) -> &str {
        &self.validator.provider
    }

    fn endpoint(&self) -> Option<&str> {
        self.channel.endpoint.as_deref()
    }

    fn data_dir(&self) -> &str {
        &self.store.data_dir
    }

    fn key_field(&self) -> &str {
        &self.relay.key_field
    }

    fn timeout_seconds(&self) -> u64 {
        self.channel.timeout_seconds
    }

    fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            required_fields: self.validator.required_fields.clone(),
            patterns: self.validator.patterns.clone(),
            max_field_length: self.validator.max_field_length,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("relay.name", &self.relay.name)?;
        validate_non_empty_string("relay.key_field", &self.relay.key_field)?;
        validate_non_empty_string("store.provider", &self.store.provider)?;
        validate_non_empty_string("channel.provider", &self.channel.provider)?;
        validate_non_empty_string("validator.provider", &self.validator.provider)?;
        validate_path("store.data_dir", &self.store.data_dir)?;
        validate_positive_number("channel.timeout_seconds", self.channel.timeout_seconds, 1)?;

        if let Some(endpoint) = &self.channel.endpoint {
            validate_url("channel.endpoint", endpoint)?;
        }

        Ok(())
    }
}
