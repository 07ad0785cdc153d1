use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The unit that flows through a relay: one record plus its identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    pub received_at: DateTime<Utc>,
    pub data: HashMap<String, serde_json::Value>,
}

impl Envelope {
    pub fn new(id: impl Into<String>, data: HashMap<String, serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            received_at: Utc::now(),
            data,
        }
    }

    /// Build an envelope from a JSON object. The id is taken from `key_field`
    /// when the record carries it (stringified), otherwise `rec-{index}`.
    pub fn from_object(
        index: usize,
        key_field: &str,
        object: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let id = match object.get(key_field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => format!("rec-{}", index),
        };
        Self::new(id, object.into_iter().collect())
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(|v| v.as_str())
    }
}

/// Counts from one relay run. `accepted + rejected == received` and every
/// accepted envelope is forwarded exactly once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelayReport {
    pub received: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub forwarded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProbeStatus {
    Healthy,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    pub capability: &'static str,
    pub provider: String,
    pub status: ProbeStatus,
    /// Optional contract operations the provider does not implement. These do
    /// not affect the health status.
    pub unsupported_ops: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub capabilities: Vec<CapabilityReport>,
}

impl ProbeReport {
    pub fn healthy(&self) -> bool {
        self.capabilities
            .iter()
            .all(|c| c.status == ProbeStatus::Healthy)
    }
}

/// Declarative configuration for the rule validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Field name to regex the field's string value must match.
    #[serde(default)]
    pub patterns: HashMap<String, String>,
    pub max_field_length: Option<usize>,
}
