//! Monotonic event-id allocation
//!
//! One counter for the whole catalog, seeded at 1 and advanced past every
//! identifier seen on load so reloaded and freshly created events never
//! collide. Deleted identifiers are never reused.

use types::ids::EventId;

/// Issues unique, monotonically increasing event identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Fresh allocator; the first id issued is 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocator already advanced past every id in the iterator
    pub fn seeded(ids: impl IntoIterator<Item = EventId>) -> Self {
        let mut alloc = Self::new();
        for id in ids {
            alloc.observe(id);
        }
        alloc
    }

    /// Advance the counter past an identifier seen on load
    pub fn observe(&mut self, id: EventId) {
        self.next = self.next.max(id.as_u64().saturating_add(1));
    }

    /// Issue the next identifier
    ///
    /// The counter saturates at `u64::MAX`, matching `observe`, so an
    /// allocator seeded with the top identifier keeps handing it back
    /// instead of wrapping to zero.
    pub fn allocate(&mut self) -> EventId {
        let id = EventId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// The identifier the next `allocate` call will return
    pub fn peek(&self) -> EventId {
        EventId::new(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
