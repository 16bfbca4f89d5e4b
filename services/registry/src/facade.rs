//! Registry facade
//!
//! Single entry point tying the event store, the identity directory,
//! and the flat files together. Mutations take `&mut self`, so one
//! caller at a time. Every mutation lands in memory first and then the
//! affected file is rewritten in full; a failed rewrite keeps the
//! change and reports the saved state as stale.

use tracing::{error, info, warn};
use types::errors::{EventError, IdentityError, RegistryError};
use types::event::{CapacityWarning, Event, EventDraft, EventUpdate};
use types::identity::{Identity, IdentityDraft, IdentityUpdate};
use types::ids::EventId;

use crate::config::RegistryConfig;
use crate::directory::IdentityDirectory;
use crate::export::RegistrantReport;
use crate::files::{FileError, FileStore, LoadReport};
use crate::store::EventStore;

/// Durability of an accepted mutation.
///
/// `NotDurable` means the change is live in memory but the file
/// rewrite failed, so a restart would lose it.
#[must_use = "a NotDurable outcome means the files no longer match memory"]
#[derive(Debug)]
pub enum Outcome<T> {
    Durable(T),
    NotDurable { value: T, error: FileError },
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Durable(value) => value,
            Self::NotDurable { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Durable(value) => value,
            Self::NotDurable { value, .. } => value,
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }
}

/// Result of an event edit.
#[derive(Debug, Clone)]
pub struct EventEdit {
    pub event: Event,
    pub warning: Option<CapacityWarning>,
}

/// What each file contributed at startup.
#[derive(Debug)]
pub struct OpenReport {
    pub events: LoadReport,
    pub identities: LoadReport,
}

impl OpenReport {
    pub fn is_clean(&self) -> bool {
        self.events.is_clean() && self.identities.is_clean()
    }
}

/// Event registry over flat-file storage.
#[derive(Debug)]
pub struct Registry {
    store: EventStore,
    directory: IdentityDirectory,
    files: FileStore,
}

impl Registry {
    /// Open the registry, loading whatever the files hold.
    ///
    /// Missing files mean a fresh start; malformed lines are skipped
    /// and listed in the report.
    pub fn open(config: &RegistryConfig) -> (Self, OpenReport) {
        let files = FileStore::new(config);
        let (events, events_report) = files.load_events();
        let (identities, identities_report) = files.load_identities();
        let store = EventStore::from_events(events);
        let directory = IdentityDirectory::from_identities(identities);
        info!(
            events = store.len(),
            identities = directory.len(),
            skipped = events_report.skipped.len() + identities_report.skipped.len(),
            "Registry opened"
        );
        let registry = Self {
            store,
            directory,
            files,
        };
        let report = OpenReport {
            events: events_report,
            identities: identities_report,
        };
        (registry, report)
    }

    pub fn create_event(&mut self, draft: EventDraft) -> Result<Outcome<Event>, RegistryError> {
        let event = self.store.create_event(draft)?.clone();
        Ok(self.persist_events(event))
    }

    pub fn edit_event(
        &mut self,
        id: EventId,
        update: EventUpdate,
    ) -> Result<Outcome<EventEdit>, RegistryError> {
        let warning = self.store.update_event(id, update)?;
        let event = self.event_snapshot(id)?;
        Ok(self.persist_events(EventEdit { event, warning }))
    }

    /// Delete an event, discarding its registrations.
    pub fn delete_event(&mut self, id: EventId) -> Result<Outcome<Event>, RegistryError> {
        let event = self.store.delete_event(id)?;
        Ok(self.persist_events(event))
    }

    pub fn view_event(&self, id: EventId) -> Result<Event, RegistryError> {
        Ok(self.event_snapshot(id)?)
    }

    /// Events in creation order.
    pub fn list_events(&self) -> Vec<Event> {
        self.store.list().cloned().collect()
    }

    /// Register an identity for an event.
    ///
    /// The event is looked up before the username, so registering an
    /// unknown username for a missing event reports the missing event.
    /// The seat is taken under the directory's casing of the username.
    pub fn register_participant(
        &mut self,
        id: EventId,
        username: &str,
    ) -> Result<Outcome<Event>, RegistryError> {
        if self.store.get(id).is_none() {
            return Err(EventError::NotFound { id }.into());
        }
        let canonical = self
            .directory
            .canonical_username(username)
            .ok_or_else(|| IdentityError::NotFound {
                username: username.to_string(),
            })?;
        self.store.register(id, canonical)?;
        let event = self.event_snapshot(id)?;
        Ok(self.persist_events(event))
    }

    /// Release a seat.
    ///
    /// Usernames without a directory entry pass through unchanged, so
    /// a seat held by a deleted or hand-entered name can still be
    /// released under its exact spelling.
    pub fn unregister_participant(
        &mut self,
        id: EventId,
        username: &str,
    ) -> Result<Outcome<Event>, RegistryError> {
        let canonical = self.directory.canonical_username(username).unwrap_or(username);
        self.store.unregister(id, canonical)?;
        let event = self.event_snapshot(id)?;
        Ok(self.persist_events(event))
    }

    /// Registered usernames of one event, in registration order.
    pub fn list_registrants(&self, id: EventId) -> Result<Vec<String>, RegistryError> {
        let event = self.store.get(id).ok_or(EventError::NotFound { id })?;
        Ok(event.registrants().map(str::to_string).collect())
    }

    /// Identity records behind one event's registrations.
    ///
    /// Registered usernames with no directory entry are skipped.
    pub fn list_identities_registered_to(
        &self,
        id: EventId,
    ) -> Result<Vec<Identity>, RegistryError> {
        let event = self.store.get(id).ok_or(EventError::NotFound { id })?;
        let mut identities = Vec::new();
        for username in event.registrants() {
            match self.directory.get(username) {
                Some(identity) => identities.push(identity.clone()),
                None => warn!(event_id = %id, username, "Registrant has no identity record"),
            }
        }
        Ok(identities)
    }

    /// Events a known identity is registered for, in creation order.
    pub fn list_events_registered_for(
        &self,
        username: &str,
    ) -> Result<Vec<Event>, RegistryError> {
        let canonical = self
            .directory
            .canonical_username(username)
            .ok_or_else(|| IdentityError::NotFound {
                username: username.to_string(),
            })?;
        Ok(self.store.events_for(canonical).cloned().collect())
    }

    /// Printable registrant report for one event.
    pub fn registrant_report(&self, id: EventId) -> Result<RegistrantReport, RegistryError> {
        let event = self.store.get(id).ok_or(EventError::NotFound { id })?;
        let report = RegistrantReport::build(event, |username| self.directory.get(username));
        Ok(report)
    }

    pub fn create_identity(
        &mut self,
        draft: IdentityDraft,
    ) -> Result<Outcome<Identity>, RegistryError> {
        let identity = self.directory.create(draft)?.clone();
        Ok(self.persist_identities(identity))
    }

    /// Update an identity's profile fields or password.
    pub fn update_identity(
        &mut self,
        username: &str,
        update: IdentityUpdate,
    ) -> Result<Outcome<Identity>, RegistryError> {
        let identity = self.directory.update(username, update)?.clone();
        Ok(self.persist_identities(identity))
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<Identity, RegistryError> {
        Ok(self.directory.authenticate(username, password)?.clone())
    }

    /// Identities in creation order.
    pub fn list_identities(&self) -> Vec<Identity> {
        self.directory.list().cloned().collect()
    }

    fn event_snapshot(&self, id: EventId) -> Result<Event, EventError> {
        self.store
            .get(id)
            .cloned()
            .ok_or(EventError::NotFound { id })
    }

    fn persist_events<T>(&self, value: T) -> Outcome<T> {
        match self.files.save_events(self.store.list()) {
            Ok(()) => Outcome::Durable(value),
            Err(err) => {
                error!(%err, "Event file rewrite failed, change is in memory only");
                Outcome::NotDurable { value, error: err }
            }
        }
    }

    fn persist_identities<T>(&self, value: T) -> Outcome<T> {
        match self.files.save_identities(self.directory.list()) {
            Ok(()) => Outcome::Durable(value),
            Err(err) => {
                error!(%err, "Identity file rewrite failed, change is in memory only");
                Outcome::NotDurable { value, error: err }
            }
        }
    }
}
