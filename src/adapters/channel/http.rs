use crate::domain::model::Envelope;
use crate::domain::ports::{Channel, Provider};
use crate::utils::error::{CapError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Send-only channel that POSTs each envelope as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    endpoint: String,
    client: Client,
}

impl HttpChannel {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Provider for HttpChannel {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn connect(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)
    }
}

#[async_trait]
impl Channel for HttpChannel {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        tracing::debug!(id = %envelope.id, endpoint = %self.endpoint, "posting envelope");
        let response = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
