// Domain layer: catalog models and the ports adapters plug into.

pub mod model;
pub mod ports;
