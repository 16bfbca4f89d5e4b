//! Tolerant load and full-rewrite save for the two persisted files
//!
//! Loading never fails: a missing file is a fresh start, an unreadable
//! file degrades to an empty collection, and each malformed line is
//! skipped and recorded. Saving rewrites the whole file through a temp
//! file, fsync and rename, so a crash mid-write never leaves a
//! half-written catalog behind. The two files are independent; there is
//! no cross-file transaction.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, warn};
use types::event::Event;
use types::identity::Identity;

use crate::codec::{self, DecodeError};
use crate::config::RegistryConfig;

/// Save failure
///
/// Raised only by the rewrite path; by the time it surfaces, the
/// in-memory mutation has already been applied.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to rewrite {path}: {source}")]
    Rewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One skipped line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file
    pub line_number: usize,
    pub reason: DecodeError,
}

/// What a load pass found
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub path: PathBuf,
    /// Records decoded successfully
    pub loaded: usize,
    /// Lines skipped, with their reasons
    pub skipped: Vec<SkippedLine>,
    /// Set when the file existed but could not be read
    pub read_error: Option<String>,
}

impl LoadReport {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            loaded: 0,
            skipped: Vec::new(),
            read_error: None,
        }
    }

    /// True when nothing was skipped or lost
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.read_error.is_none()
    }
}

/// Reads and rewrites the persisted files
#[derive(Debug, Clone)]
pub struct FileStore {
    events_path: PathBuf,
    identities_path: PathBuf,
}

impl FileStore {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            events_path: config.events_path(),
            identities_path: config.identities_path(),
        }
    }

    /// Load the event catalog
    pub fn load_events(&self) -> (Vec<Event>, LoadReport) {
        load_records(&self.events_path, codec::decode_event)
    }

    /// Load the identity directory
    pub fn load_identities(&self) -> (Vec<Identity>, LoadReport) {
        load_records(&self.identities_path, codec::decode_identity)
    }

    /// Rewrite the event file from the current catalog
    pub fn save_events<'a>(
        &self,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> Result<(), FileError> {
        let mut contents = String::new();
        for event in events {
            contents.push_str(&codec::encode_event(event));
            contents.push('\n');
        }
        rewrite(&self.events_path, &contents)
    }

    /// Rewrite the identity file from the current directory
    pub fn save_identities<'a>(
        &self,
        identities: impl IntoIterator<Item = &'a Identity>,
    ) -> Result<(), FileError> {
        let mut contents = String::new();
        for identity in identities {
            contents.push_str(&codec::encode_identity(identity));
            contents.push('\n');
        }
        rewrite(&self.identities_path, &contents)
    }
}

fn load_records<T>(path: &Path, decode: fn(&str) -> Result<T, DecodeError>) -> (Vec<T>, LoadReport) {
    let mut report = LoadReport::new(path.to_path_buf());
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No existing file, starting empty");
            return (Vec::new(), report);
        }
        Err(err) => {
            error!(path = %path.display(), %err, "Failed to read file, starting empty");
            report.read_error = Some(err.to_string());
            return (Vec::new(), report);
        }
    };

    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        match decode(line) {
            Ok(record) => {
                records.push(record);
                report.loaded += 1;
            }
            Err(reason) => {
                warn!(
                    path = %path.display(),
                    line = index + 1,
                    %reason,
                    "Skipping malformed record"
                );
                report.skipped.push(SkippedLine {
                    line_number: index + 1,
                    reason,
                });
            }
        }
    }
    (records, report)
}

fn rewrite(path: &Path, contents: &str) -> Result<(), FileError> {
    write_atomic(path, contents).map_err(|source| FileError::Rewrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    // Write to tmp, fsync, close, then rename over the target; the
    // handle must be closed before the rename lands on Windows.
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}
