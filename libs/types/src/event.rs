//! Event entity and its registrant set
//!
//! An event is a capacity-limited gathering. Its registrant set records who
//! holds a seat, in registration order, and is only ever mutated through
//! `register`/`unregister`, which is where the capacity bound is enforced.

use crate::errors::{require_clean, require_no_delimiter, EventError, ValidationError};
use crate::ids::EventId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Caller-supplied fields for a new event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub capacity: u32,
}

impl EventDraft {
    /// Check the draft against the write-time input rules
    ///
    /// Name, date and location must be non-blank; no text field may
    /// contain the delimiter or a line break. The description may be
    /// empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_clean("name", &self.name)?;
        require_clean("date", &self.date)?;
        require_clean("location", &self.location)?;
        require_no_delimiter("description", &self.description)
    }
}

/// Partial update for an existing event
///
/// `None` means "keep the current value". Mapping blank prompt input to
/// `None` is the caller's convention; supplied values are applied as-is
/// once they pass the format check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
}

impl EventUpdate {
    /// Check every supplied field against the format rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_no_delimiter("name", name)?;
        }
        if let Some(description) = &self.description {
            require_no_delimiter("description", description)?;
        }
        if let Some(date) = &self.date {
            require_no_delimiter("date", date)?;
        }
        if let Some(location) = &self.location {
            require_no_delimiter("location", location)?;
        }
        Ok(())
    }

    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.capacity.is_none()
    }
}

/// Warning raised when an edit shrinks capacity below the seated count
///
/// The edit is still applied; existing registrations are never evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityWarning {
    pub capacity: u32,
    pub registered: usize,
}

/// A capacity-limited event and its registrants
///
/// Invariant: `registered() <= capacity()` is enforced at `register`, not
/// by field access. A persisted file can restore an over-full event; the
/// store keeps it as loaded and never makes it worse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    description: String,
    date: String,
    location: String,
    capacity: u32,
    registrants: IndexSet<String>,
}

impl Event {
    /// Create a new event from a validated draft
    ///
    /// Capacity 0 is clamped up to 1.
    pub fn new(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            date: draft.date,
            location: draft.location,
            capacity: draft.capacity.max(1),
            registrants: IndexSet::new(),
        }
    }

    /// Rebuild an event from persisted fields
    ///
    /// The registrant set keeps file order; duplicate usernames collapse
    /// into one membership. Capacity is clamped to at least 1.
    pub fn restore(
        id: EventId,
        name: String,
        description: String,
        date: String,
        location: String,
        capacity: u32,
        registrants: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            date,
            location,
            capacity: capacity.max(1),
            registrants: registrants.into_iter().collect(),
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Registered usernames in registration order
    pub fn registrants(&self) -> impl Iterator<Item = &str> {
        self.registrants.iter().map(String::as_str)
    }

    /// Number of seats taken
    pub fn registered(&self) -> usize {
        self.registrants.len()
    }

    /// Seats still open
    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.registrants.len() as u32)
    }

    pub fn is_full(&self) -> bool {
        self.registrants.len() >= self.capacity as usize
    }

    /// Exact-match membership test; callers pass the canonical username
    pub fn is_registered(&self, username: &str) -> bool {
        self.registrants.contains(username)
    }

    /// Register a username
    ///
    /// Membership is checked before the capacity bound, so an existing
    /// member of a full event still reads back `AlreadyRegistered`.
    pub fn register(&mut self, username: &str) -> Result<(), EventError> {
        if self.registrants.contains(username) {
            return Err(EventError::AlreadyRegistered {
                id: self.id,
                username: username.to_string(),
            });
        }
        if self.is_full() {
            return Err(EventError::Full {
                id: self.id,
                capacity: self.capacity,
            });
        }
        self.registrants.insert(username.to_string());
        Ok(())
    }

    /// Remove a registration, preserving the order of everyone else
    pub fn unregister(&mut self, username: &str) -> Result<(), EventError> {
        if self.registrants.shift_remove(username) {
            Ok(())
        } else {
            Err(EventError::NotRegistered {
                id: self.id,
                username: username.to_string(),
            })
        }
    }

    /// Apply a validated partial update
    ///
    /// Returns a warning when a supplied capacity lands below the current
    /// seated count.
    pub fn apply(&mut self, update: EventUpdate) -> Option<CapacityWarning> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        let mut warning = None;
        if let Some(capacity) = update.capacity {
            self.capacity = capacity.max(1);
            if self.registrants.len() > self.capacity as usize {
                warning = Some(CapacityWarning {
                    capacity: self.capacity,
                    registered: self.registrants.len(),
                });
            }
        }
        warning
    }
}
