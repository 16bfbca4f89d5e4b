//! Registrant report export
//!
//! Renders the registrant list of one event as plain text or JSON for
//! external consumption.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use types::event::Event;
use types::identity::Identity;
use types::ids::EventId;

/// One resolved registrant on the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantRow {
    pub position: usize,
    pub username: String,
    pub name: String,
    pub email: String,
}

/// Registrant list of one event, resolved against the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrantReport {
    pub event_id: EventId,
    pub event_name: String,
    pub date: String,
    pub location: String,
    pub capacity: u32,
    pub registered: usize,
    pub rows: Vec<RegistrantRow>,
}

impl RegistrantReport {
    /// Build a report for one event.
    ///
    /// Registered usernames with no directory entry are left off the
    /// report; `registered` still counts every taken seat.
    pub fn build<'a>(event: &Event, resolve: impl Fn(&str) -> Option<&'a Identity>) -> Self {
        let mut rows = Vec::new();
        for username in event.registrants() {
            let Some(identity) = resolve(username) else {
                warn!(
                    event_id = %event.id(),
                    username,
                    "Registrant has no identity record, leaving off report"
                );
                continue;
            };
            rows.push(RegistrantRow {
                position: rows.len() + 1,
                username: identity.username().to_string(),
                name: identity.name().to_string(),
                email: identity.email().to_string(),
            });
        }
        Self {
            event_id: event.id(),
            event_name: event.name().to_string(),
            date: event.date().to_string(),
            location: event.location().to_string(),
            capacity: event.capacity(),
            registered: event.registered(),
            rows,
        }
    }

    /// Render the report as console-style text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Event {}: {}\n", self.event_id, self.event_name));
        out.push_str(&format!("Date: {}\n", self.date));
        out.push_str(&format!("Location: {}\n", self.location));
        out.push_str(&format!(
            "Registered: {}/{}\n",
            self.registered, self.capacity
        ));
        if self.rows.is_empty() {
            out.push_str("No participants registered.\n");
        } else {
            for row in &self.rows {
                out.push_str(&format!(
                    "  {}. {} ({}) {}\n",
                    row.position, row.name, row.username, row.email
                ));
            }
        }
        out
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Write the text rendering to a file path.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::event::EventDraft;
    use types::identity::{IdentityDraft, Role};

    fn event() -> Event {
        let mut event = Event::new(
            EventId::new(3),
            EventDraft {
                name: "Rust Workshop".to_string(),
                description: "hands-on".to_string(),
                date: "2025-03-14".to_string(),
                location: "Lab 2".to_string(),
                capacity: 25,
            },
        );
        event.register("alice").unwrap();
        event.register("bob").unwrap();
        event
    }

    fn identity(username: &str, name: &str) -> Identity {
        Identity::new(
            IdentityDraft {
                username: username.to_string(),
                password: "pw".to_string(),
                role: Role::Student,
                name: name.to_string(),
                phone: "0123456789".to_string(),
                gender: "F".to_string(),
                email: format!("{username}@example.edu"),
            },
            "digest".to_string(),
        )
    }

    #[test]
    fn test_build_resolves_rows_in_order() {
        let alice = identity("alice", "Alice Tan");
        let bob = identity("bob", "Bob Lim");
        let event = event();

        let report = RegistrantReport::build(&event, |username| match username {
            "alice" => Some(&alice),
            "bob" => Some(&bob),
            _ => None,
        });

        assert_eq!(report.registered, 2);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].position, 1);
        assert_eq!(report.rows[0].name, "Alice Tan");
        assert_eq!(report.rows[1].username, "bob");
    }

    #[test]
    fn test_build_leaves_dangling_registrant_off() {
        let alice = identity("alice", "Alice Tan");
        let event = event();

        let report = RegistrantReport::build(&event, |username| {
            (username == "alice").then_some(&alice)
        });

        assert_eq!(report.registered, 2);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].username, "alice");
    }

    #[test]
    fn test_to_text_lists_registrants() {
        let alice = identity("alice", "Alice Tan");
        let bob = identity("bob", "Bob Lim");
        let event = event();

        let report = RegistrantReport::build(&event, |username| match username {
            "alice" => Some(&alice),
            "bob" => Some(&bob),
            _ => None,
        });

        let text = report.to_text();
        assert!(text.starts_with("Event 3: Rust Workshop\n"));
        assert!(text.contains("Registered: 2/25\n"));
        assert!(text.contains("  1. Alice Tan (alice) alice@example.edu\n"));
        assert!(text.contains("  2. Bob Lim (bob) bob@example.edu\n"));
    }

    #[test]
    fn test_to_text_empty_event() {
        let event = Event::new(
            EventId::new(9),
            EventDraft {
                name: "Quiet Night".to_string(),
                description: String::new(),
                date: "2025-06-01".to_string(),
                location: "Hall".to_string(),
                capacity: 10,
            },
        );
        let report = RegistrantReport::build(&event, |_| None);
        assert!(report.to_text().contains("No participants registered.\n"));
    }

    #[test]
    fn test_json_roundtrip() {
        let alice = identity("alice", "Alice Tan");
        let event = event();
        let report =
            RegistrantReport::build(&event, |username| (username == "alice").then_some(&alice));

        let parsed: RegistrantReport = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(parsed.event_id, EventId::new(3));
        assert_eq!(parsed.rows, report.rows);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let event = event();
        let report = RegistrantReport::build(&event, |_| None);

        report.write_to_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.to_text());
    }
}
