//! Identity directory
//!
//! Usernames are unique case-insensitively; the original casing is kept
//! and echoed back. Credentials live here only as digests.

use indexmap::IndexMap;
use tracing::{debug, warn};
use types::errors::IdentityError;
use types::identity::{fold_username, Identity, IdentityDraft, IdentityUpdate};

use crate::credential;

/// In-memory identity directory keyed by case-folded username
#[derive(Debug, Clone, Default)]
pub struct IdentityDirectory {
    identities: IndexMap<String, Identity>,
}

impl IdentityDirectory {
    pub fn new() -> Self {
        Self {
            identities: IndexMap::new(),
        }
    }

    /// Directory rebuilt from persisted identities
    ///
    /// Two lines folding to the same key keep the first and drop the
    /// rest with a warning.
    pub fn from_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let mut directory = Self::new();
        for identity in identities {
            let key = identity.key();
            if directory.identities.contains_key(&key) {
                warn!(
                    username = identity.username(),
                    "Duplicate username on load, keeping the first"
                );
                continue;
            }
            directory.identities.insert(key, identity);
        }
        directory
    }

    /// Create an identity from a draft, digesting its password
    pub fn create(&mut self, draft: IdentityDraft) -> Result<&Identity, IdentityError> {
        draft.validate()?;
        let key = fold_username(&draft.username);
        if self.identities.contains_key(&key) {
            return Err(IdentityError::UsernameTaken {
                username: draft.username,
            });
        }
        let digest = credential::digest(&draft.username, &draft.password);
        debug!(username = %draft.username, role = %draft.role, "Identity created");
        let identity = self
            .identities
            .entry(key)
            .or_insert_with(|| Identity::new(draft, digest));
        Ok(identity)
    }

    /// Case-insensitive lookup
    pub fn get(&self, username: &str) -> Option<&Identity> {
        self.identities.get(&fold_username(username))
    }

    /// The stored casing for a username, if present
    pub fn canonical_username(&self, username: &str) -> Option<&str> {
        self.get(username).map(Identity::username)
    }

    /// Check a credential pair
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to
    /// the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&Identity, IdentityError> {
        let identity = self.get(username).ok_or(IdentityError::InvalidCredentials)?;
        if credential::verify(identity.username(), password, identity.password()) {
            Ok(identity)
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    /// Apply a profile update
    ///
    /// Username and role never change; a supplied password is
    /// re-digested before it is stored.
    pub fn update(
        &mut self,
        username: &str,
        update: IdentityUpdate,
    ) -> Result<&Identity, IdentityError> {
        update.validate()?;
        let key = fold_username(username);
        let identity = self
            .identities
            .get_mut(&key)
            .ok_or_else(|| IdentityError::NotFound {
                username: username.to_string(),
            })?;
        if let Some(password) = &update.password {
            let digest = credential::digest(identity.username(), password);
            identity.set_password(digest);
        }
        identity.apply_profile(&update);
        debug!(username = identity.username(), "Identity updated");
        Ok(identity)
    }

    /// Identities in creation order
    pub fn list(&self) -> impl Iterator<Item = &Identity> {
        self.identities.values()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
