// Domain layer: core models and ports (interfaces). No network or parsing dependencies here.

pub mod model;
pub mod ports;
