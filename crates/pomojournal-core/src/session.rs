//! Append-only log of completed work sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;
use crate::storage::{now_millis, Collection, Loaded, Persisted, Store};
use crate::timer::{SessionCompleted, TimerMode};

/// One finished work interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub when: DateTime<Utc>,
    pub mode: TimerMode,
    pub length_min: u32,
}

impl PomodoroSession {
    /// A work session finishing now.
    pub fn work(length_min: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            when: now_millis(),
            mode: TimerMode::Work,
            length_min,
        }
    }
}

impl From<SessionCompleted> for PomodoroSession {
    fn from(done: SessionCompleted) -> Self {
        Self {
            mode: done.mode,
            ..Self::work(done.length_min)
        }
    }
}

/// Owns the sessions collection. Records are never mutated or removed.
pub struct SessionLog {
    store: Store,
    sessions: Loaded<PomodoroSession>,
}

impl SessionLog {
    pub fn open(store: Store) -> Self {
        let sessions = store.open_collection(Collection::Sessions);
        Self { store, sessions }
    }

    /// Append a record for a completed work interval.
    pub fn record(&mut self, completed: SessionCompleted) -> Persisted<PomodoroSession> {
        let session = PomodoroSession::from(completed);
        tracing::debug!(id = %session.id, length_min = session.length_min, "recording session");
        self.sessions.records.push(session.clone());
        Persisted::from_save(session, self.persist())
    }

    /// Sessions in the order they were recorded.
    pub fn list(&self) -> &[PomodoroSession] {
        &self.sessions.records
    }

    /// The most recently recorded session.
    pub fn latest(&self) -> Option<&PomodoroSession> {
        self.sessions.records.last()
    }

    /// Total focused minutes across all sessions.
    pub fn total_minutes(&self) -> u64 {
        self.sessions.records.iter().map(|s| u64::from(s.length_min)).sum()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save_loaded(Collection::Sessions, &self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_reload() {
        let store = Store::in_memory();
        let mut log = SessionLog::open(store.clone());
        assert!(log.latest().is_none());

        let first = log
            .record(SessionCompleted {
                mode: TimerMode::Work,
                length_min: 25,
            })
            .into_inner();
        let second = log
            .record(SessionCompleted {
                mode: TimerMode::Work,
                length_min: 50,
            })
            .into_inner();
        assert_ne!(first.id, second.id);

        let reloaded = SessionLog::open(store);
        assert_eq!(reloaded.list(), &[first, second.clone()]);
        assert_eq!(reloaded.latest(), Some(&second));
        assert_eq!(reloaded.total_minutes(), 75);
    }

    #[test]
    fn session_json_layout() {
        let session = PomodoroSession::work(25);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["mode"], "work");
        assert_eq!(json["lengthMin"], 25);
        assert!(json["when"].is_i64());
    }
}
