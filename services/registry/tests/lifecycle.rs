//! End-to-end registration flows
//!
//! Drives the full facade the way a front end would:
//! - Event creation, editing, deletion
//! - Seat allocation up to capacity and release
//! - Cross views between events and identities
//! - Registrant report rendering

use registry::{Registry, RegistryConfig};
use tempfile::TempDir;
use types::errors::{EventError, IdentityError, RegistryError};
use types::event::{EventDraft, EventUpdate};
use types::identity::{IdentityDraft, IdentityUpdate, Role};
use types::ids::EventId;

fn open_registry() -> (TempDir, Registry) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().unwrap();
    let (registry, report) = Registry::open(&RegistryConfig::new(dir.path()));
    assert!(report.is_clean());
    (dir, registry)
}

fn event_draft(name: &str, capacity: u32) -> EventDraft {
    EventDraft {
        name: name.to_string(),
        description: "hands-on".to_string(),
        date: "2025-03-14".to_string(),
        location: "Lab 2".to_string(),
        capacity,
    }
}

fn student(username: &str, name: &str) -> IdentityDraft {
    IdentityDraft {
        username: username.to_string(),
        password: "hunter2".to_string(),
        role: Role::Student,
        name: name.to_string(),
        phone: "0123456789".to_string(),
        gender: "F".to_string(),
        email: format!("{username}@example.edu"),
    }
}

#[test]
fn test_event_lifecycle() {
    let (_dir, mut registry) = open_registry();

    let event = registry
        .create_event(event_draft("Rust Workshop", 25))
        .unwrap()
        .into_value();
    assert_eq!(event.id(), EventId::new(1));
    assert_eq!(registry.list_events().len(), 1);

    let edit = registry
        .edit_event(
            event.id(),
            EventUpdate {
                location: Some("Auditorium".to_string()),
                ..EventUpdate::default()
            },
        )
        .unwrap()
        .into_value();
    assert_eq!(edit.event.location(), "Auditorium");
    assert!(edit.warning.is_none());

    let viewed = registry.view_event(event.id()).unwrap();
    assert_eq!(viewed.location(), "Auditorium");
    assert_eq!(viewed.name(), "Rust Workshop");

    let deleted = registry.delete_event(event.id()).unwrap().into_value();
    assert_eq!(deleted.id(), event.id());
    assert!(registry.list_events().is_empty());
    assert_eq!(
        registry.view_event(event.id()).unwrap_err(),
        RegistryError::Event(EventError::NotFound { id: event.id() })
    );
    assert_eq!(
        registry.list_registrants(event.id()).unwrap_err(),
        RegistryError::Event(EventError::NotFound { id: event.id() })
    );
}

#[test]
fn test_capacity_two_workshop() {
    let (_dir, mut registry) = open_registry();
    for username in ["alice", "bob", "carol"] {
        let _ = registry.create_identity(student(username, username)).unwrap();
    }
    let id = registry
        .create_event(event_draft("Workshop", 2))
        .unwrap()
        .into_value()
        .id();

    let _ = registry.register_participant(id, "alice").unwrap();
    let _ = registry.register_participant(id, "bob").unwrap();

    // Third seat does not exist; carol is refused, not queued
    let err = registry.register_participant(id, "carol").unwrap_err();
    assert_eq!(
        err,
        RegistryError::Event(EventError::Full { id, capacity: 2 })
    );

    let _ = registry.unregister_participant(id, "alice").unwrap();
    let _ = registry.register_participant(id, "carol").unwrap();

    assert_eq!(registry.list_registrants(id).unwrap(), vec!["bob", "carol"]);
}

#[test]
fn test_duplicate_registration_across_casings() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("Alice", "Alice Tan")).unwrap();
    let id = registry
        .create_event(event_draft("Rust Workshop", 25))
        .unwrap()
        .into_value()
        .id();

    let _ = registry.register_participant(id, "alice").unwrap();
    let err = registry.register_participant(id, "ALICE").unwrap_err();
    assert_eq!(
        err,
        RegistryError::Event(EventError::AlreadyRegistered {
            id,
            username: "Alice".to_string()
        })
    );
    assert_eq!(registry.list_registrants(id).unwrap(), vec!["Alice"]);
}

#[test]
fn test_unregister_requires_membership() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("alice", "Alice Tan")).unwrap();
    let id = registry
        .create_event(event_draft("Rust Workshop", 25))
        .unwrap()
        .into_value()
        .id();

    let err = registry.unregister_participant(id, "alice").unwrap_err();
    assert_eq!(
        err,
        RegistryError::Event(EventError::NotRegistered {
            id,
            username: "alice".to_string()
        })
    );
}

#[test]
fn test_cross_views_stay_consistent() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("alice", "Alice Tan")).unwrap();
    let _ = registry.create_identity(student("bob", "Bob Lim")).unwrap();
    let workshop = registry
        .create_event(event_draft("Workshop", 10))
        .unwrap()
        .into_value()
        .id();
    let seminar = registry
        .create_event(event_draft("Seminar", 10))
        .unwrap()
        .into_value()
        .id();

    let _ = registry.register_participant(workshop, "alice").unwrap();
    let _ = registry.register_participant(seminar, "alice").unwrap();
    let _ = registry.register_participant(seminar, "bob").unwrap();

    let alice_events: Vec<String> = registry
        .list_events_registered_for("alice")
        .unwrap()
        .iter()
        .map(|event| event.name().to_string())
        .collect();
    assert_eq!(alice_events, vec!["Workshop", "Seminar"]);

    let seminar_names: Vec<String> = registry
        .list_identities_registered_to(seminar)
        .unwrap()
        .iter()
        .map(|identity| identity.name().to_string())
        .collect();
    assert_eq!(seminar_names, vec!["Alice Tan", "Bob Lim"]);

    assert_eq!(
        registry.list_events_registered_for("nobody").unwrap_err(),
        RegistryError::Identity(IdentityError::NotFound {
            username: "nobody".to_string()
        })
    );
}

#[test]
fn test_registrant_report_rendering() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("alice", "Alice Tan")).unwrap();
    let _ = registry.create_identity(student("bob", "Bob Lim")).unwrap();
    let id = registry
        .create_event(event_draft("Rust Workshop", 25))
        .unwrap()
        .into_value()
        .id();
    let _ = registry.register_participant(id, "alice").unwrap();
    let _ = registry.register_participant(id, "bob").unwrap();

    let report = registry.registrant_report(id).unwrap();
    let text = report.to_text();
    assert!(text.starts_with("Event 1: Rust Workshop\n"));
    assert!(text.contains("Registered: 2/25\n"));
    assert!(text.contains("  1. Alice Tan (alice) alice@example.edu\n"));
    assert!(text.contains("  2. Bob Lim (bob) bob@example.edu\n"));
}

#[test]
fn test_identity_profile_update() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("alice", "Alice Tan")).unwrap();

    let updated = registry
        .update_identity(
            "ALICE",
            IdentityUpdate {
                password: Some("swordfish".to_string()),
                phone: Some("0199999999".to_string()),
                ..IdentityUpdate::default()
            },
        )
        .unwrap()
        .into_value();
    assert_eq!(updated.phone(), "0199999999");

    assert!(registry.authenticate("alice", "swordfish").is_ok());
    assert_eq!(
        registry.authenticate("alice", "hunter2").unwrap_err(),
        RegistryError::Identity(IdentityError::InvalidCredentials)
    );
}

#[test]
fn test_deleting_event_frees_nothing_else() {
    let (_dir, mut registry) = open_registry();
    let _ = registry.create_identity(student("alice", "Alice Tan")).unwrap();
    let first = registry
        .create_event(event_draft("First", 5))
        .unwrap()
        .into_value()
        .id();
    let second = registry
        .create_event(event_draft("Second", 5))
        .unwrap()
        .into_value()
        .id();
    let _ = registry.register_participant(first, "alice").unwrap();
    let _ = registry.register_participant(second, "alice").unwrap();

    let _ = registry.delete_event(first).unwrap();

    let remaining: Vec<String> = registry
        .list_events_registered_for("alice")
        .unwrap()
        .iter()
        .map(|event| event.name().to_string())
        .collect();
    assert_eq!(remaining, vec!["Second"]);
}
