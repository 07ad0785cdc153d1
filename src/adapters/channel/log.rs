use crate::domain::model::Envelope;
use crate::domain::ports::{Channel, Provider};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Channel that emits envelopes to the log instead of a backend. Useful for
/// dry runs and as the default when no endpoint is configured.
#[derive(Debug, Default)]
pub struct LogChannel {
    sent: AtomicUsize,
}

impl LogChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Provider for LogChannel {
    fn name(&self) -> &'static str {
        "log"
    }
}

#[async_trait]
impl Channel for LogChannel {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        let body = serde_json::to_string(&envelope.data)?;
        tracing::info!(id = %envelope.id, %body, "envelope");
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
