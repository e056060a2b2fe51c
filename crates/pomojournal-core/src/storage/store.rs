//! Collection-level persistence on top of a [`KvBackend`].
//!
//! Collections are stored as JSON arrays, one key each. A missing or corrupt
//! slot reads as an empty collection; only a backend read failure is an
//! error. Saving replaces the whole slot and reports failure to the caller
//! without touching the caller's in-memory copy.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::kv::{KvBackend, MemoryKv, SqliteKv};
use crate::error::StorageError;

/// The three independently persisted record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Entries,
    Sessions,
    Tasks,
}

impl Collection {
    /// Storage key of the collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Entries => "journalEntries_v1",
            Collection::Sessions => "pomodoroSessions_v1",
            Collection::Tasks => "tasks_v1",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of a mutating repository call.
///
/// The mutation always applies in memory; `warning` is set when the
/// follow-up write to storage failed and the collection is now unsynced.
#[derive(Debug)]
#[must_use]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> Persisted<T> {
    pub fn synced(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub(crate) fn from_save(value: T, saved: Result<(), StorageError>) -> Self {
        Self {
            value,
            warning: saved.err(),
        }
    }

    pub fn is_synced(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Records a repository loaded, and whether the load reached storage.
///
/// An unreadable collection starts empty in memory but is never written
/// back, so the stored copy survives until a later open can read it.
#[derive(Debug)]
pub(crate) struct Loaded<T> {
    pub records: Vec<T>,
    pub readable: bool,
}

/// Shared handle to the key-value backend.
///
/// Cloning is cheap; every repository holds its own clone.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl Store {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by `<data_dir>/pomojournal.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(SqliteKv::open_default()?)))
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKv::new()))
    }

    /// Load a collection, substituting an empty one when the slot is absent
    /// or does not parse.
    ///
    /// # Errors
    /// Returns the backend error when the slot could not be read at all.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StorageError> {
        let Some(raw) = self.backend.get(collection.key())? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(%collection, count = records.len(), "loaded collection");
                Ok(records)
            }
            Err(e) => {
                warn!(%collection, error = %e, "failed to parse collection, using empty");
                Ok(Vec::new())
            }
        }
    }

    /// Load a collection for a repository that will write it back.
    pub(crate) fn open_collection<T: DeserializeOwned>(&self, collection: Collection) -> Loaded<T> {
        match self.load(collection) {
            Ok(records) => Loaded {
                records,
                readable: true,
            },
            Err(e) => {
                warn!(%collection, error = %e, "failed to read collection, writes disabled");
                Loaded {
                    records: Vec::new(),
                    readable: false,
                }
            }
        }
    }

    /// [`Store::save`], unless the collection was never read successfully.
    pub(crate) fn save_loaded<T: Serialize>(
        &self,
        collection: Collection,
        loaded: &Loaded<T>,
    ) -> Result<(), StorageError> {
        if !loaded.readable {
            return Err(StorageError::Unreadable {
                key: collection.key().to_string(),
            });
        }
        self.save(collection, &loaded.records)
    }

    /// Serialize and write the full collection, replacing the prior value.
    ///
    /// # Errors
    /// Returns the storage failure; nothing is partially written.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records).map_err(|source| StorageError::Serialize {
            key: collection.key().to_string(),
            source,
        })?;
        if let Err(e) = self.backend.set(collection.key(), &json) {
            warn!(%collection, error = %e, "failed to save collection");
            return Err(e);
        }
        debug!(%collection, count = records.len(), "saved collection");
        Ok(())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        assert_eq!(Collection::Entries.key(), "journalEntries_v1");
        assert_eq!(Collection::Sessions.key(), "pomodoroSessions_v1");
        assert_eq!(Collection::Tasks.key(), "tasks_v1");
    }

    #[test]
    fn missing_collection_loads_empty() {
        let store = Store::in_memory();
        let loaded: Vec<String> = store.load(Collection::Entries).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_collection_loads_empty() {
        let kv = Arc::new(MemoryKv::new());
        kv.insert_raw(Collection::Tasks.key(), "{not json");
        let store = Store::new(kv);
        let loaded: Vec<String> = store.load(Collection::Tasks).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = Store::in_memory();
        let records = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        store.save(Collection::Sessions, &records).unwrap();
        let loaded: Vec<String> = store.load(Collection::Sessions).unwrap();
        assert_eq!(loaded, records);
        // Other collections are untouched.
        assert!(store.load::<String>(Collection::Tasks).unwrap().is_empty());
    }

    #[test]
    fn failed_save_keeps_previous_value() {
        let store = Store::new(Arc::new(MemoryKv::with_quota(16)));
        store.save(Collection::Entries, &["ok".to_string()]).unwrap();
        let big = vec!["x".repeat(64)];
        assert!(store.save(Collection::Entries, &big).is_err());
        let loaded: Vec<String> = store.load(Collection::Entries).unwrap();
        assert_eq!(loaded, vec!["ok".to_string()]);
    }

    struct UnreadableKv;

    impl KvBackend for UnreadableKv {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Locked)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            panic!("an unreadable collection must not be written");
        }
    }

    #[test]
    fn read_failure_is_an_error_and_blocks_writes() {
        let store = Store::new(Arc::new(UnreadableKv));
        assert!(matches!(
            store.load::<String>(Collection::Tasks),
            Err(StorageError::Locked)
        ));

        let mut loaded = store.open_collection::<String>(Collection::Tasks);
        assert!(!loaded.readable);
        loaded.records.push("new".to_string());
        assert!(matches!(
            store.save_loaded(Collection::Tasks, &loaded),
            Err(StorageError::Unreadable { .. })
        ));
    }
}
