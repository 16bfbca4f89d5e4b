//! Identity entity and role
//!
//! An identity is one person in the directory: a unique username, a stored
//! credential digest, and descriptive profile fields. Roles are a fixed
//! two-value enum; there is no per-role subtype anywhere in the core.

use crate::errors::{require_clean, require_no_delimiter, require_present, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role assigned at creation, never reassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    /// Canonical form used in the persisted file
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized role string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Case-insensitive on read; `Display` is canonical on write
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("admin") {
            Ok(Role::Admin)
        } else if s.eq_ignore_ascii_case("student") {
            Ok(Role::Student)
        } else {
            Err(ParseRoleError(s.to_string()))
        }
    }
}

/// Fold a username for case-insensitive comparison
///
/// Trim plus lowercase. Directory keys, duplicate checks and credential
/// salts all go through this one function.
pub fn fold_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Caller-supplied fields for a new identity
///
/// `password` is the plaintext credential; the directory digests it
/// before anything is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDraft {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub email: String,
}

impl IdentityDraft {
    /// Check the draft against the write-time input rules
    ///
    /// The username must be non-blank and single-line with no delimiter;
    /// the password must be non-blank (any characters are fine, only its
    /// digest is stored); descriptive fields may be empty but must pass
    /// the same format check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_clean("username", &self.username)?;
        require_present("password", &self.password)?;
        require_no_delimiter("name", &self.name)?;
        require_no_delimiter("phone", &self.phone)?;
        require_no_delimiter("gender", &self.gender)?;
        require_no_delimiter("email", &self.email)
    }
}

/// Partial profile update
///
/// `None` keeps the current value. Username and role never change; a
/// supplied password arrives plaintext and is re-digested by the
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityUpdate {
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
}

impl IdentityUpdate {
    /// Check every supplied field against the write-time input rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(password) = &self.password {
            require_present("password", password)?;
        }
        if let Some(name) = &self.name {
            require_no_delimiter("name", name)?;
        }
        if let Some(phone) = &self.phone {
            require_no_delimiter("phone", phone)?;
        }
        if let Some(gender) = &self.gender {
            require_no_delimiter("gender", gender)?;
        }
        if let Some(email) = &self.email {
            require_no_delimiter("email", email)?;
        }
        Ok(())
    }
}

/// One person in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    username: String,
    password: String,
    role: Role,
    name: String,
    phone: String,
    gender: String,
    email: String,
}

impl Identity {
    /// Build a stored identity from a draft and its credential digest
    pub fn new(draft: IdentityDraft, digest: String) -> Self {
        Self {
            username: draft.username,
            password: digest,
            role: draft.role,
            name: draft.name,
            phone: draft.phone,
            gender: draft.gender,
            email: draft.email,
        }
    }

    /// Rebuild an identity from persisted fields
    pub fn restore(
        username: String,
        password: String,
        role: Role,
        name: String,
        phone: String,
        gender: String,
        email: String,
    ) -> Self {
        Self {
            username,
            password,
            role,
            name,
            phone,
            gender,
            email,
        }
    }

    /// Username in its stored, canonical casing
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored credential digest (never the plaintext)
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Case-folded key for directory lookups
    pub fn key(&self) -> String {
        fold_username(&self.username)
    }

    /// Replace the stored credential digest
    pub fn set_password(&mut self, digest: String) {
        self.password = digest;
    }

    /// Apply the descriptive fields of a validated update
    ///
    /// The password member is ignored here; the directory digests it and
    /// calls `set_password` separately.
    pub fn apply_profile(&mut self, update: &IdentityUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(gender) = &update.gender {
            self.gender = gender.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
    }
}
