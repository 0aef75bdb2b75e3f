//! Agrimed API Models
//!
//! - Envelope: the uniform `{success, message, data}` wrapper
//! - Marketplace: listing queries and response payloads
//! - AI: consultation outcomes and prompt history payloads

mod ai;
mod envelope;
mod marketplace;

pub use ai::*;
pub use envelope::*;
pub use marketplace::*;
