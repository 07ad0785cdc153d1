use crate::domain::model::{Envelope, ValidationRules};
use crate::utils::error::{CapError, Result};
use async_trait::async_trait;

/// Base contract every backend-facing provider implements. `connect` and
/// `disconnect` default to no-ops for providers without session state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry name of the concrete provider.
    fn name(&self) -> &'static str;

    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        Ok(())
    }
}

/// Key-value storage capability. A missing key is `None`, not an error, and
/// `delete` is idempotent. `keys` is optional; providers that cannot enumerate
/// inherit the `Unsupported` default.
#[async_trait]
pub trait KeyValueStore: Provider + std::fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    async fn keys(&self) -> Result<Vec<String>> {
        Err(CapError::Unsupported {
            capability: "store",
            provider: self.name().to_string(),
            operation: "keys",
        })
    }
}

/// Message delivery capability. `receive` is optional; send-only backends
/// inherit the `Unsupported` default.
#[async_trait]
pub trait Channel: Provider + std::fmt::Debug {
    async fn send(&self, envelope: &Envelope) -> Result<()>;

    async fn receive(&self) -> Result<Option<Envelope>> {
        Err(CapError::Unsupported {
            capability: "channel",
            provider: self.name().to_string(),
            operation: "receive",
        })
    }
}

/// Record acceptance capability. Rejections surface as
/// `CapError::Validation` carrying the envelope id and a reason.
pub trait Validator: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn validate(&self, envelope: &Envelope) -> Result<()>;
}

/// Read-only view of the active configuration, implemented by the CLI flags
/// and by TOML files alike. Composers and provider factories depend on this
/// trait, never on a concrete config type.
pub trait ConfigProvider: Send + Sync {
    fn store_provider(&self) -> &str;

    fn channel_provider(&self) -> &str;

    fn validator_provider(&self) -> &str;

    /// Target endpoint for network channels. Required by the `http` channel.
    fn endpoint(&self) -> Option<&str>;

    /// Base directory for filesystem-backed stores.
    fn data_dir(&self) -> &str;

    /// Record field whose value becomes the envelope id.
    fn key_field(&self) -> &str;

    fn timeout_seconds(&self) -> u64;

    fn validation_rules(&self) -> ValidationRules;
}
