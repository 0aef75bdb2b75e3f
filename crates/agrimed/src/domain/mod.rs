//! Domain Layer
//!
//! Pure domain logic without infrastructure dependencies.
//! Contains entities, value objects, the catalog query model, validation and errors.

pub mod consultation;
pub mod entities;
pub mod errors;
pub mod query;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use consultation::*;
pub use entities::*;
pub use errors::*;
pub use query::*;
pub use validation::*;
pub use value_objects::*;
