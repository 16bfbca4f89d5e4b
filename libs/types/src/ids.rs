//! Unique identifier types for registry entities
//!
//! Event identifiers are small monotonic integers issued by the registry's
//! allocator, so they stay stable and human-readable in the persisted files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for an event
///
/// Wraps the raw counter value issued by the allocator. Identifiers are
/// immutable once assigned and never reused, even after the event is
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Create from a raw counter value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw counter value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseIntError;

    /// Parses the exact decimal form `Display` produces; no trimming
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}
