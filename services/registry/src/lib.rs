//! Event registration service
//!
//! Owns the in-memory event catalog and identity directory, the flat-file
//! persistence that keeps them across restarts, and the facade that front
//! ends drive.
//!
//! # Modules
//! - `alloc`: Monotonic event-id allocation
//! - `codec`: One-line-per-entity record encoding
//! - `config`: Data directory configuration
//! - `credential`: Password digests
//! - `directory`: Identity directory
//! - `export`: Registrant report rendering
//! - `facade`: The `Registry` surface front ends call
//! - `files`: Tolerant load and full-rewrite save
//! - `store`: Event catalog and registration rules

pub mod alloc;
pub mod codec;
pub mod config;
pub mod credential;
pub mod directory;
pub mod export;
pub mod facade;
pub mod files;
pub mod store;

pub use config::RegistryConfig;
pub use facade::{EventEdit, OpenReport, Outcome, Registry};
