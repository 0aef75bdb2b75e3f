//! Application Layer (Use Cases)
//!
//! Services that orchestrate domain operations.
//! These services depend on repository traits (ports), not concrete implementations.

mod advisor_service;
mod catalog_service;

pub use advisor_service::AdvisorService;
pub use catalog_service::CatalogService;
