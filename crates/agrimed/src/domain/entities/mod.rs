//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - MedicineListing: A marketplace listing for a plant disease medicine
//! - PromptRecord: A persisted AI advisor exchange

mod medicine;
mod prompt_record;

pub use medicine::*;
pub use prompt_record::*;
