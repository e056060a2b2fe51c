//! Core error types for pomojournal-core.
//!
//! Read-side corruption never shows up here: the store recovers from it by
//! handing back an empty collection. A backend read failure does, since the
//! stored data may still be intact. Write failures, configuration
//! problems and rejected input each have their own enum.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open storage at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Reading a key failed at the backend level
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },

    /// Writing a key failed (quota, locked database, disk full...)
    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// A collection could not be serialized
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// The collection failed to load, so writing it would discard stored data
    #[error("Refusing to overwrite '{key}': it could not be read")]
    Unreadable { key: String },

    /// Database is locked
    #[error("Storage is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Every line of a task batch was blank
    #[error("Please enter at least one task")]
    EmptyBatch,

    /// Attach was requested with nothing in the editor
    #[error("No content in editor to attach")]
    EmptyAttachment,
}
