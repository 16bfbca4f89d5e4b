//! One-line-per-entity record encoding
//!
//! Both persisted files use the same shape: one `;`-delimited line per
//! record. Event lines carry their registrant usernames as trailing
//! fields; identity lines are exactly seven fields. Decoding is per-line
//! and skip-tolerant: a malformed line yields a typed error the loader
//! logs and steps over, never aborting the rest of the file.

use thiserror::Error;
use types::event::Event;
use types::identity::{Identity, Role};
use types::ids::EventId;
use types::FIELD_DELIMITER;

/// Fixed fields on an event line, before the registrant tail
pub const EVENT_FIELDS: usize = 6;
/// Fields on an identity line
pub const IDENTITY_FIELDS: usize = 7;

/// Why a line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Field '{field}' is not a number: '{value}'")]
    BadNumber { field: &'static str, value: String },

    #[error("Unknown role '{value}'")]
    UnknownRole { value: String },
}

/// Encode an event as one line (no trailing newline)
pub fn encode_event(event: &Event) -> String {
    let d = FIELD_DELIMITER;
    let mut line = format!(
        "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
        event.id(),
        event.name(),
        event.description(),
        event.date(),
        event.location(),
        event.capacity()
    );
    for username in event.registrants() {
        line.push(d);
        line.push_str(username);
    }
    line
}

/// Decode one event line
///
/// Splitting keeps empty trailing fields, so an empty description still
/// counts toward the arity. Fields past the sixth are registrant
/// usernames; empty ones are dropped.
pub fn decode_event(line: &str) -> Result<Event, DecodeError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < EVENT_FIELDS {
        return Err(DecodeError::FieldCount {
            expected: EVENT_FIELDS,
            found: fields.len(),
        });
    }
    let id: EventId = fields[0].parse().map_err(|_| DecodeError::BadNumber {
        field: "id",
        value: fields[0].to_string(),
    })?;
    let capacity: u32 = fields[5].parse().map_err(|_| DecodeError::BadNumber {
        field: "capacity",
        value: fields[5].to_string(),
    })?;
    let registrants = fields[EVENT_FIELDS..]
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| field.to_string());
    Ok(Event::restore(
        id,
        fields[1].to_string(),
        fields[2].to_string(),
        fields[3].to_string(),
        fields[4].to_string(),
        capacity,
        registrants,
    ))
}

/// Encode an identity as one line (no trailing newline)
pub fn encode_identity(identity: &Identity) -> String {
    let d = FIELD_DELIMITER;
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
        identity.username(),
        identity.password(),
        identity.role(),
        identity.name(),
        identity.phone(),
        identity.gender(),
        identity.email()
    )
}

/// Decode one identity line
pub fn decode_identity(line: &str) -> Result<Identity, DecodeError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != IDENTITY_FIELDS {
        return Err(DecodeError::FieldCount {
            expected: IDENTITY_FIELDS,
            found: fields.len(),
        });
    }
    let role: Role = fields[2].parse().map_err(|_| DecodeError::UnknownRole {
        value: fields[2].to_string(),
    })?;
    Ok(Identity::restore(
        fields[0].to_string(),
        fields[1].to_string(),
        role,
        fields[3].to_string(),
        fields[4].to_string(),
        fields[5].to_string(),
        fields[6].to_string(),
    ))
}
