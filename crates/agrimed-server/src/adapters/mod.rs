//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod gemini;
pub mod memory;
pub mod postgres;

// Re-exports
pub use gemini::GeminiAdvisor;
pub use memory::{InMemoryMedicineRepository, InMemoryPromptRepository};
pub use postgres::{PgMedicineRepository, PgPromptRepository};
