use crate::adapters::channel::{HttpChannel, LogChannel};
use crate::adapters::store::{LocalStore, MemoryStore};
use crate::adapters::validator::{AcceptAll, RuleValidator};
use crate::domain::ports::{Channel, ConfigProvider, KeyValueStore, Validator};
use crate::utils::error::{CapError, Result};
use std::collections::HashMap;
use std::sync::Arc;

pub type StoreFactory =
    Box<dyn Fn(&dyn ConfigProvider) -> Result<Arc<dyn KeyValueStore>> + Send + Sync>;
pub type ChannelFactory =
    Box<dyn Fn(&dyn ConfigProvider) -> Result<Arc<dyn Channel>> + Send + Sync>;
pub type ValidatorFactory =
    Box<dyn Fn(&dyn ConfigProvider) -> Result<Arc<dyn Validator>> + Send + Sync>;

/// Name-based provider registry. Factories receive the active configuration
/// so providers are injected fully constructed; callers never downcast or
/// branch on concrete types.
#[derive(Default)]
pub struct Registry {
    stores: HashMap<String, StoreFactory>,
    channels: HashMap<String, ChannelFactory>,
    validators: HashMap<String, ValidatorFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in providers: stores `memory` and
    /// `local`, channels `http` and `log`, validators `rules` and `accept`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register_store("memory", |_| Ok(Arc::new(MemoryStore::new())));
        registry.register_store("local", |config| {
            Ok(Arc::new(LocalStore::new(config.data_dir())))
        });

        registry.register_channel("http", |config| {
            let endpoint = config.endpoint().ok_or_else(|| CapError::MissingConfig {
                field: "endpoint".to_string(),
            })?;
            Ok(Arc::new(HttpChannel::new(endpoint, config.timeout_seconds())?))
        });
        registry.register_channel("log", |_| Ok(Arc::new(LogChannel::new())));

        registry.register_validator("rules", |config| {
            Ok(Arc::new(RuleValidator::from_rules(
                &config.validation_rules(),
            )?))
        });
        registry.register_validator("accept", |_| Ok(Arc::new(AcceptAll)));

        registry
    }

    /// Registering under an existing name replaces the previous factory.
    pub fn register_store<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ConfigProvider) -> Result<Arc<dyn KeyValueStore>> + Send + Sync + 'static,
    {
        self.stores.insert(name.into(), Box::new(factory));
    }

    pub fn register_channel<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ConfigProvider) -> Result<Arc<dyn Channel>> + Send + Sync + 'static,
    {
        self.channels.insert(name.into(), Box::new(factory));
    }

    pub fn register_validator<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ConfigProvider) -> Result<Arc<dyn Validator>> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Box::new(factory));
    }

    pub fn store(&self, name: &str, config: &dyn ConfigProvider) -> Result<Arc<dyn KeyValueStore>> {
        let factory = self.stores.get(name).ok_or_else(|| CapError::UnknownProvider {
            capability: "store",
            name: name.to_string(),
        })?;
        factory(config)
    }

    pub fn channel(&self, name: &str, config: &dyn ConfigProvider) -> Result<Arc<dyn Channel>> {
        let factory = self
            .channels
            .get(name)
            .ok_or_else(|| CapError::UnknownProvider {
                capability: "channel",
                name: name.to_string(),
            })?;
        factory(config)
    }

    pub fn validator(&self, name: &str, config: &dyn ConfigProvider) -> Result<Arc<dyn Validator>> {
        let factory = self
            .validators
            .get(name)
            .ok_or_else(|| CapError::UnknownProvider {
                capability: "validator",
                name: name.to_string(),
            })?;
        factory(config)
    }
}
