pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{probe::Probe, registry::Registry, relay::Relay};
pub use crate::domain::model::{
    CapabilityReport, Envelope, ProbeReport, ProbeStatus, RelayReport, ValidationRules,
};
pub use crate::domain::ports::{Channel, ConfigProvider, KeyValueStore, Provider, Validator};
pub use crate::utils::error::{CapError, Result};
