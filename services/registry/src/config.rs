//! Data directory configuration
//!
//! Plain constructed values; nothing here reads the environment or
//! command line. Front ends decide where the data lives.

use std::path::PathBuf;

/// Where the registry keeps its two files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Directory holding both files; created on first write if absent
    pub data_dir: PathBuf,
    /// Event catalog file name
    pub events_file: String,
    /// Identity directory file name
    pub identities_file: String,
}

impl RegistryConfig {
    /// Configuration rooted at the given directory, default file names
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            events_file: "events.txt".to_string(),
            identities_file: "users.txt".to_string(),
        }
    }

    /// Full path of the event file
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    /// Full path of the identity file
    pub fn identities_path(&self) -> PathBuf {
        self.data_dir.join(&self.identities_file)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new("data")
    }
}
