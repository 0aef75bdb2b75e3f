//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (catalog store, prompt history, AI provider).
//!
//! Implementations of these traits live in the server crate's adapters.

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
