// Domain layer: price list, selection and message types plus the ports the core depends on.

pub mod model;
pub mod ports;
