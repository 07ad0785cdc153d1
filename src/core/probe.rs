use crate::core::registry::Registry;
use crate::domain::model::{CapabilityReport, Envelope, ProbeReport, ProbeStatus};
use crate::domain::ports::{Channel, ConfigProvider, KeyValueStore, Provider, Validator};
use crate::utils::error::{CapError, Result};
use std::collections::HashMap;
use std::sync::Arc;

const PROBE_KEY: &str = "__capstan_probe__";

/// Health probe over the configured providers. Exercises each capability
/// through its contract only: a store round-trip, a channel connect, and one
/// validator call. Optional operations a provider leaves unimplemented are
/// reported separately and never count against health.
pub struct Probe {
    store: Arc<dyn KeyValueStore>,
    channel: Arc<dyn Channel>,
    validator: Arc<dyn Validator>,
}

impl Probe {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        channel: Arc<dyn Channel>,
        validator: Arc<dyn Validator>,
    ) -> Self {
        Self {
            store,
            channel,
            validator,
        }
    }

    pub fn from_registry(registry: &Registry, config: &dyn ConfigProvider) -> Result<Self> {
        Ok(Self::new(
            registry.store(config.store_provider(), config)?,
            registry.channel(config.channel_provider(), config)?,
            registry.validator(config.validator_provider(), config)?,
        ))
    }

    pub async fn run(&self) -> ProbeReport {
        let report = ProbeReport {
            capabilities: vec![
                self.probe_store().await,
                self.probe_channel().await,
                self.probe_validator(),
            ],
        };
        for capability in &report.capabilities {
            tracing::info!(
                capability = capability.capability,
                provider = %capability.provider,
                status = ?capability.status,
                unsupported = ?capability.unsupported_ops,
                "probe result"
            );
        }
        report
    }

    async fn probe_store(&self) -> CapabilityReport {
        let mut unsupported_ops = Vec::new();
        let status = match self.store_roundtrip().await {
            Ok(()) => ProbeStatus::Healthy,
            Err(e) => ProbeStatus::Failed(e.to_string()),
        };
        if let Err(e) = self.store.keys().await {
            if e.is_unsupported() {
                unsupported_ops.push("keys");
            }
        }

        CapabilityReport {
            capability: "store",
            provider: self.store.name().to_string(),
            status,
            unsupported_ops,
        }
    }

    async fn store_roundtrip(&self) -> Result<()> {
        self.store.connect().await?;
        self.store.put(PROBE_KEY, b"probe").await?;
        let read_back = self.store.get(PROBE_KEY).await?;
        self.store.delete(PROBE_KEY).await?;
        self.store.disconnect().await?;

        if read_back.as_deref() == Some(b"probe".as_slice()) {
            Ok(())
        } else {
            Err(CapError::Config {
                message: "store round-trip returned different bytes".to_string(),
            })
        }
    }

    /// Connect is the only side effect a probe is allowed against a
    /// messaging backend; no envelope is ever sent.
    async fn probe_channel(&self) -> CapabilityReport {
        let mut unsupported_ops = Vec::new();
        let status = match self.channel.connect().await {
            Ok(()) => {
                if let Err(e) = self.channel.disconnect().await {
                    ProbeStatus::Failed(e.to_string())
                } else {
                    ProbeStatus::Healthy
                }
            }
            Err(e) => ProbeStatus::Failed(e.to_string()),
        };
        if let Err(e) = self.channel.receive().await {
            if e.is_unsupported() {
                unsupported_ops.push("receive");
            }
        }

        CapabilityReport {
            capability: "channel",
            provider: self.channel.name().to_string(),
            status,
            unsupported_ops,
        }
    }

    /// A validator is healthy when it answers at all; rejecting the probe
    /// envelope is a valid answer.
    fn probe_validator(&self) -> CapabilityReport {
        let probe_envelope = Envelope::new(PROBE_KEY, HashMap::new());
        let status = match self.validator.validate(&probe_envelope) {
            Ok(()) | Err(CapError::Validation { .. }) => ProbeStatus::Healthy,
            Err(e) => ProbeStatus::Failed(e.to_string()),
        };

        CapabilityReport {
            capability: "validator",
            provider: self.validator.name().to_string(),
            status,
            unsupported_ops: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::channel::LogChannel;
    use crate::adapters::store::MemoryStore;
    use crate::adapters::validator::{AcceptAll, RuleValidator};
    use crate::domain::model::ValidationRules;
    use crate::domain::ports::Provider;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct DownChannel;

    #[async_trait]
    impl Provider for DownChannel {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn connect(&self) -> Result<()> {
            Err(CapError::Config {
                message: "connection refused".to_string(),
            })
        }
    }

    #[async_trait]
    impl Channel for DownChannel {
        async fn send(&self, _envelope: &Envelope) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_all_healthy() {
        let probe = Probe::new(
            Arc::new(MemoryStore::new()),
            Arc::new(LogChannel::new()),
            Arc::new(AcceptAll),
        );

        let report = probe.run().await;
        assert!(report.healthy());
        assert_eq!(report.capabilities.len(), 3);
    }

    #[tokio::test]
    async fn test_probe_key_is_cleaned_up() {
        let store = Arc::new(MemoryStore::new());
        let probe = Probe::new(
            store.clone(),
            Arc::new(LogChannel::new()),
            Arc::new(AcceptAll),
        );

        probe.run().await;
        assert_eq!(store.get(PROBE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_send_only_channel_reports_unsupported_receive() {
        let probe = Probe::new(
            Arc::new(MemoryStore::new()),
            Arc::new(LogChannel::new()),
            Arc::new(AcceptAll),
        );

        let report = probe.run().await;
        let channel = report
            .capabilities
            .iter()
            .find(|c| c.capability == "channel")
            .unwrap();
        assert_eq!(channel.status, ProbeStatus::Healthy);
        assert_eq!(channel.unsupported_ops, vec!["receive"]);
    }

    #[tokio::test]
    async fn test_down_channel_fails_capability_only() {
        let probe = Probe::new(
            Arc::new(MemoryStore::new()),
            Arc::new(DownChannel),
            Arc::new(AcceptAll),
        );

        let report = probe.run().await;
        assert!(!report.healthy());

        let store = report
            .capabilities
            .iter()
            .find(|c| c.capability == "store")
            .unwrap();
        assert_eq!(store.status, ProbeStatus::Healthy);

        let channel = report
            .capabilities
            .iter()
            .find(|c| c.capability == "channel")
            .unwrap();
        assert!(matches!(channel.status, ProbeStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_rejecting_validator_is_healthy() {
        let rules = ValidationRules {
            required_fields: vec!["id".to_string()],
            ..Default::default()
        };
        let probe = Probe::new(
            Arc::new(MemoryStore::new()),
            Arc::new(LogChannel::new()),
            Arc::new(RuleValidator::from_rules(&rules).unwrap()),
        );

        // The probe envelope has no fields, so the validator rejects it.
        // That still proves the capability answers.
        let report = probe.run().await;
        let validator = report
            .capabilities
            .iter()
            .find(|c| c.capability == "validator")
            .unwrap();
        assert_eq!(validator.status, ProbeStatus::Healthy);
    }
}
