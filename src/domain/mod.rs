//! Domain layer: models, port traits and errors.

pub mod errors;
pub mod models;
pub mod ports;
