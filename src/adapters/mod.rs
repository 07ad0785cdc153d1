// Adapters layer: concrete providers for the domain ports. Each submodule
// covers one capability.

pub mod channel;
pub mod store;
pub mod validator;
