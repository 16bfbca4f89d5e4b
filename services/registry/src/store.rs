//! Event catalog and registration rules
//!
//! Owns every event and its registrant set. Registration outcomes are
//! decided in a fixed order: unknown event, then existing membership,
//! then the capacity bound. Catalog iteration follows creation order.

use indexmap::IndexMap;
use tracing::{debug, warn};
use types::errors::EventError;
use types::event::{CapacityWarning, Event, EventDraft, EventUpdate};
use types::ids::EventId;

use crate::alloc::IdAllocator;

/// In-memory event catalog
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: IndexMap<EventId, Event>,
    allocator: IdAllocator,
}

impl EventStore {
    /// Empty catalog; the first event created gets id 1
    pub fn new() -> Self {
        Self {
            events: IndexMap::new(),
            allocator: IdAllocator::new(),
        }
    }

    /// Catalog rebuilt from persisted events
    ///
    /// The allocator is advanced past every id present, so new events
    /// never collide with reloaded ones. A duplicated id keeps the first
    /// record and drops the rest with a warning.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut store = Self::new();
        for event in events {
            store.allocator.observe(event.id());
            if store.events.contains_key(&event.id()) {
                warn!(id = %event.id(), "Duplicate event id on load, keeping the first");
                continue;
            }
            store.events.insert(event.id(), event);
        }
        store
    }

    /// Create an event from a draft
    ///
    /// Validation runs before the id is allocated; a rejected draft
    /// consumes nothing.
    pub fn create_event(&mut self, draft: EventDraft) -> Result<&Event, EventError> {
        draft.validate()?;
        let id = self.allocator.allocate();
        debug!(%id, name = %draft.name, "Event created");
        let event = self.events.entry(id).or_insert_with(|| Event::new(id, draft));
        Ok(event)
    }

    /// Apply a partial update
    ///
    /// Returns the capacity warning, if the edit raised one.
    pub fn update_event(
        &mut self,
        id: EventId,
        update: EventUpdate,
    ) -> Result<Option<CapacityWarning>, EventError> {
        update.validate()?;
        let event = self.events.get_mut(&id).ok_or(EventError::NotFound { id })?;
        let warning = event.apply(update);
        if let Some(warning) = warning {
            warn!(
                %id,
                capacity = warning.capacity,
                registered = warning.registered,
                "Capacity set below current registrations"
            );
        }
        Ok(warning)
    }

    /// Remove an event together with its whole registrant set
    pub fn delete_event(&mut self, id: EventId) -> Result<Event, EventError> {
        let event = self
            .events
            .shift_remove(&id)
            .ok_or(EventError::NotFound { id })?;
        debug!(%id, registrants = event.registered(), "Event deleted");
        Ok(event)
    }

    /// Look up one event
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Events in creation order
    pub fn list(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Register a username for an event
    ///
    /// The caller passes the canonical username; membership is exact.
    pub fn register(&mut self, id: EventId, username: &str) -> Result<(), EventError> {
        let event = self.events.get_mut(&id).ok_or(EventError::NotFound { id })?;
        event.register(username)?;
        debug!(%id, username, seats = event.registered(), "Registered");
        Ok(())
    }

    /// Remove a registration
    pub fn unregister(&mut self, id: EventId, username: &str) -> Result<(), EventError> {
        let event = self.events.get_mut(&id).ok_or(EventError::NotFound { id })?;
        event.unregister(username)?;
        debug!(%id, username, seats = event.registered(), "Unregistered");
        Ok(())
    }

    /// Events the username is registered for, in catalog order
    pub fn events_for<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events
            .values()
            .filter(move |event| event.is_registered(username))
    }
}
