//! Text journal.
//!
//! Entries are created whole and deleted whole; "editing" is loading an
//! entry's fields back into an editor and saving a new entry.

mod entry;
mod repo;

pub use entry::{parse_tags, EntryId, JournalEntry, ATTACHED_DEFAULT_TITLE, ATTACHED_TAG};
pub use repo::EntryRepository;
