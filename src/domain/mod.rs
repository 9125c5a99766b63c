// Domain layer: request/response payloads and the FoodApi port.

pub mod model;
pub mod ports;
