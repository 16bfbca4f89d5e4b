//! Types library for the event registration store
//!
//! Core type definitions shared across the registry service: entity
//! structs, typed identifiers, and the error taxonomy.
//!
//! # Modules
//! - `ids`: Unique identifiers (EventId)
//! - `event`: Event entity and its registrant set
//! - `identity`: Identity entity and role
//! - `errors`: Error taxonomy

pub mod ids;
pub mod event;
pub mod identity;
pub mod errors;

/// Field delimiter for the persisted line formats
///
/// No field value may contain this character; input validation rejects it
/// at write time instead of escaping.
pub const FIELD_DELIMITER: char = ';';

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::event::*;
    pub use crate::identity::*;
    pub use crate::errors::*;
    pub use crate::FIELD_DELIMITER;
}
