//! Journal entry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::now_millis;

/// Unique identifier for a journal entry.
pub type EntryId = String;

/// Tag given to entries created through "attach to session".
pub const ATTACHED_TAG: &str = "attached";

/// Title used for attached notes saved without one.
pub const ATTACHED_DEFAULT_TITLE: &str = "Attached note";

/// A saved journal entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Insertion order, duplicates allowed.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Session this entry was attached to. Not validated; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_to_session: Option<String>,
}

impl JournalEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags,
            created_at: now_millis(),
            attached_to_session: None,
        }
    }
}

/// Split comma-separated tag input, trimming each tag and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
