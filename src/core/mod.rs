pub mod probe;
pub mod registry;
pub mod relay;

pub use crate::domain::model::{Envelope, ProbeReport, RelayReport};
pub use crate::domain::ports::{Channel, ConfigProvider, KeyValueStore, Provider, Validator};
pub use crate::utils::error::Result;
