use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapError {
    #[error("{capability} provider `{provider}` does not implement `{operation}`")]
    Unsupported {
        capability: &'static str,
        provider: String,
        operation: &'static str,
    },

    #[error("no {capability} provider registered under name `{name}`")]
    UnknownProvider {
        capability: &'static str,
        name: String,
    },

    #[error("validation failed for envelope `{id}`: {reason}")]
    Validation { id: String, reason: String },

    #[error("endpoint rejected envelope with status {status}")]
    Rejected { status: u16 },

    #[error("invalid pattern for field `{field}`: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value for `{field}`: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required configuration field `{field}`")]
    MissingConfig { field: String },
}

impl CapError {
    /// True when the error only reports an optional contract operation the
    /// provider left out, as opposed to a backend fault.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CapError::Unsupported { .. })
    }
}

pub type Result<T> = std::result::Result<T, CapError>;
