//! Entry repository: owns the entries collection.
//!
//! Every mutation applies to the in-memory list first and then writes the
//! whole list back. A failed write is reported through [`Persisted`] and the
//! in-memory list stays authoritative.

use tracing::debug;

use super::entry::{JournalEntry, ATTACHED_DEFAULT_TITLE, ATTACHED_TAG};
use crate::error::ValidationError;
use crate::session::PomodoroSession;
use crate::storage::{Collection, Loaded, Persisted, Store};

pub struct EntryRepository {
    store: Store,
    entries: Loaded<JournalEntry>,
}

impl EntryRepository {
    /// Load the entries collection from `store`.
    pub fn open(store: Store) -> Self {
        let entries = store.open_collection(Collection::Entries);
        Self { store, entries }
    }

    /// Save a new entry. Empty title and content are accepted.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Persisted<JournalEntry> {
        let entry = JournalEntry::new(title, content, tags);
        debug!(id = %entry.id, "creating journal entry");
        self.entries.records.push(entry.clone());
        Persisted::from_save(entry, self.persist())
    }

    /// Save the editor content as an entry linked to `session`.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyAttachment`] when title and content
    /// are both empty.
    pub fn attach_to_session(
        &mut self,
        title: &str,
        content: &str,
        session: Option<&PomodoroSession>,
    ) -> Result<Persisted<JournalEntry>, ValidationError> {
        let title = title.trim();
        if title.is_empty() && content.is_empty() {
            return Err(ValidationError::EmptyAttachment);
        }
        let title = if title.is_empty() {
            ATTACHED_DEFAULT_TITLE
        } else {
            title
        };
        let mut entry = JournalEntry::new(title, content, vec![ATTACHED_TAG.to_string()]);
        entry.attached_to_session = session.map(|s| s.id.clone());
        debug!(id = %entry.id, session = ?entry.attached_to_session, "attaching journal entry");
        self.entries.records.push(entry.clone());
        Ok(Persisted::from_save(entry, self.persist()))
    }

    /// Remove the entry with `id`. Unknown ids are a no-op; the collection
    /// is still written.
    pub fn delete(&mut self, id: &str) -> Persisted<()> {
        self.entries.records.retain(|e| e.id != id);
        Persisted::from_save((), self.persist())
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> Persisted<usize> {
        let removed = self.entries.records.len();
        self.entries.records.clear();
        Persisted::from_save(removed, self.persist())
    }

    /// Entries in creation order.
    pub fn list(&self) -> &[JournalEntry] {
        &self.entries.records
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.records.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.records.is_empty()
    }

    fn persist(&self) -> Result<(), crate::error::StorageError> {
        self.store.save_loaded(Collection::Entries, &self.entries)
    }
}
