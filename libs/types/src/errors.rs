//! Error taxonomy for the registry
//!
//! Domain errors are typed and returned, never swallowed; persistence
//! failures live in the service crate and are reported separately from
//! everything here.

use crate::ids::EventId;
use crate::FIELD_DELIMITER;
use thiserror::Error;

/// Top-level registry error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
}

/// Event-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Event {id} not found")]
    NotFound { id: EventId },

    #[error("'{username}' is already registered for event {id}")]
    AlreadyRegistered { id: EventId, username: String },

    #[error("'{username}' is not registered for event {id}")]
    NotRegistered { id: EventId, username: String },

    #[error("Event {id} is full ({capacity} seats)")]
    Full { id: EventId, capacity: u32 },

    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

/// Identity-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    #[error("Identity '{username}' not found")]
    NotFound { username: String },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

/// Input rejected before any mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' must not be blank")]
    Blank { field: &'static str },

    #[error("Field '{field}' must not contain the field delimiter")]
    Delimiter { field: &'static str },

    #[error("Field '{field}' must not span multiple lines")]
    LineBreak { field: &'static str },
}

/// Reject a value containing the field delimiter or a line break
///
/// Both are structural in the persisted files: the delimiter separates
/// fields, the newline separates records. A value carrying either would
/// rewrite cleanly but shear apart on the next load.
pub fn require_no_delimiter(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(FIELD_DELIMITER) {
        return Err(ValidationError::Delimiter { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::LineBreak { field });
    }
    Ok(())
}

/// Reject a blank value; any characters are allowed
///
/// Used for passwords, which never reach the files verbatim (only the
/// hex digest is stored), so the format rules do not apply.
pub fn require_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Reject a blank value or one that breaks the persisted format
pub fn require_clean(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require_present(field, value)?;
    require_no_delimiter(field, value)
}
