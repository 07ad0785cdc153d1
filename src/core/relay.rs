use crate::core::registry::Registry;
use crate::domain::model::{Envelope, RelayReport};
use crate::domain::ports::{Channel, ConfigProvider, KeyValueStore, Provider, Validator};
use crate::utils::error::Result;
use std::sync::Arc;

/// Composer over the three capabilities: every envelope is validated, the
/// accepted ones are persisted and forwarded. Depends only on the contracts.
#[derive(Debug)]
pub struct Relay {
    store: Arc<dyn KeyValueStore>,
    channel: Arc<dyn Channel>,
    validator: Arc<dyn Validator>,
}

impl Relay {
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

    /// Resolve the providers named by the configuration from the registry.
    pub fn from_registry(registry: &Registry, config: &dyn ConfigProvider) -> Result<Self> {
        Ok(Self::new(
            registry.store(config.store_provider(), config)?,
            registry.channel(config.channel_provider(), config)?,
            registry.validator(config.validator_provider(), config)?,
        ))
    }

    /// Run one batch. Validation failures are counted per envelope and never
    /// abort the batch; store and channel faults do.
    pub async fn run(&self, envelopes: Vec<Envelope>) -> Result<RelayReport> {
        tracing::info!(
            count = envelopes.len(),
            store = self.store.name(),
            channel = self.channel.name(),
            validator = self.validator.name(),
            "starting relay"
        );

        self.store.connect().await?;
        if let Err(e) = self.channel.connect().await {
            let _ = self.store.disconnect().await;
            return Err(e);
        }

        let outcome = self.process(envelopes).await;

        if let Err(e) = self.channel.disconnect().await {
            tracing::warn!(error = %e, "channel disconnect failed");
        }
        if let Err(e) = self.store.disconnect().await {
            tracing::warn!(error = %e, "store disconnect failed");
        }

        match &outcome {
            Ok(report) => tracing::info!(
                accepted = report.accepted,
                rejected = report.rejected,
                forwarded = report.forwarded,
                "relay complete"
            ),
            Err(e) => tracing::error!(error = %e, "relay failed"),
        }
        outcome
    }

    async fn process(&self, envelopes: Vec<Envelope>) -> Result<RelayReport> {
        let mut report = RelayReport {
            received: envelopes.len(),
            ..Default::default()
        };

        for envelope in envelopes {
            if let Err(e) = self.validator.validate(&envelope) {
                tracing::warn!(id = %envelope.id, error = %e, "envelope rejected");
                report.rejected += 1;
                continue;
            }

            let body = serde_json::to_vec(&envelope)?;
            self.store.put(&envelope.id, &body).await?;
            report.accepted += 1;

            self.channel.send(&envelope).await?;
            report.forwarded += 1;
        }

        Ok(report)
    }
}
