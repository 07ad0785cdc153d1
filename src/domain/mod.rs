// Domain layer: core models and ports (interfaces). No dependencies on
// adapters or on any concrete backend.

pub mod model;
pub mod ports;
