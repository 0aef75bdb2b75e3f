//! Service Ports
//!
//! Abstract interfaces for external services.

mod plant_advisor;

pub use plant_advisor::*;
