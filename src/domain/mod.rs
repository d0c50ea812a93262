// Domain layer: response model and ports (interfaces). No HTTP or framework code here.

pub mod model;
pub mod ports;
