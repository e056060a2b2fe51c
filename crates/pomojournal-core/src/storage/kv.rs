//! Key-value slots backing the persistent store.
//!
//! Each collection lives under its own key and is always written whole, so a
//! single `set` is the unit of atomicity. Two backends are provided:
//! - [`SqliteKv`]: a `kv` table in `pomojournal.db` under the data directory
//! - [`MemoryKv`]: a process-local map with an optional byte quota

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::data_dir;
use crate::error::StorageError;

/// Database file name inside the data directory.
pub const DB_FILE_NAME: &str = "pomojournal.db";

/// A string-keyed slot store with whole-value replacement.
///
/// Implementations must serialize writers internally; callers may share one
/// backend between several repositories.
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed key-value store.
pub struct SqliteKv {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteKv {
    /// Open the database at `<data_dir>/pomojournal.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = data_dir()?.join(DB_FILE_NAME);
        Self::open(&path)
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let kv = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        };
        kv.migrate()?;
        debug!(path = %path.display(), "opened sqlite kv store");
        Ok(kv)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let kv = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        kv.migrate()?;
        Ok(kv)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Locked)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| StorageError::Open {
            path: self.path.clone().unwrap_or_else(|| PathBuf::from(":memory:")),
            source: e,
        })?;
        Ok(())
    }
}

impl KvBackend for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Locked)?;
        conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Locked)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| write_error(key, e))?;
        Ok(())
    }
}

fn write_error(key: &str, err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseLocked
                || e.code == rusqlite::ErrorCode::DatabaseBusy =>
        {
            StorageError::Locked
        }
        _ => StorageError::Write {
            key: key.to_string(),
            message: err.to_string(),
        },
    }
}

/// In-memory key-value store.
///
/// An optional quota caps the total number of value bytes, mirroring the
/// per-origin limits of browser storage.
#[derive(Debug, Default)]
pub struct MemoryKv {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once values exceed `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Store a raw value, bypassing serialization. Handy for seeding
    /// corrupt data.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().map_err(|_| StorageError::Locked)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::Locked)?;
        if let Some(quota) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + value.len() > quota {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    message: format!("quota of {quota} bytes exceeded"),
                });
            }
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
