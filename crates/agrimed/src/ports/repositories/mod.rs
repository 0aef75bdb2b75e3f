//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod medicine_repository;
mod prompt_repository;

pub use medicine_repository::*;
pub use prompt_repository::*;
