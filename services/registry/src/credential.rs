//! Password digests
//!
//! Identities never store plaintext credentials. The stored form is a
//! lowercase-hex SHA-256 over the case-folded username and the password,
//! so the same password under two usernames still digests differently.
//! Not a tunable KDF; swapping in one means replacing these two
//! functions and re-creating stored identities.

use sha2::{Digest, Sha256};
use types::identity::fold_username;

/// Digest a plaintext password for storage
pub fn digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fold_username(username).as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a plaintext password against a stored digest
pub fn verify(username: &str, password: &str, stored: &str) -> bool {
    digest(username, password) == stored
}
