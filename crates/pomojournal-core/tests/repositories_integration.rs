//! Integration tests for the repositories over an on-disk SQLite store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pomojournal_core::{
    Collection, EntryRepository, KvBackend, MemoryKv, SessionCompleted, SessionLog, SqliteKv,
    StorageError, Store, Task, TaskFilter, TaskRepository, TimerMode,
};
use proptest::prelude::*;

fn sqlite_store(dir: &tempfile::TempDir) -> Store {
    let kv = SqliteKv::open(&dir.path().join("pomojournal.db")).unwrap();
    Store::new(Arc::new(kv))
}

#[test]
fn collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (entry, created_tasks, session) = {
        let store = sqlite_store(&dir);
        let mut entries = EntryRepository::open(store.clone());
        let mut tasks = TaskRepository::open(store.clone());
        let mut sessions = SessionLog::open(store);

        let entry = entries
            .create("Morning", "Slept well.", vec!["mood".into(), "sleep".into()])
            .into_inner();
        let task_id = tasks
            .create_batch(["buy milk", "call mom"])
            .unwrap()
            .into_inner()[1]
            .id
            .clone();
        tasks.toggle_completed(&task_id).into_inner();
        let created_tasks: Vec<Task> = tasks.list(TaskFilter::All).into_iter().cloned().collect();
        let session = sessions
            .record(SessionCompleted {
                mode: TimerMode::Work,
                length_min: 25,
            })
            .into_inner();
        (entry, created_tasks, session)
    };

    let store = sqlite_store(&dir);
    let entries = EntryRepository::open(store.clone());
    let tasks = TaskRepository::open(store.clone());
    let sessions = SessionLog::open(store);

    assert_eq!(entries.list(), &[entry]);
    let reloaded_tasks: Vec<Task> = tasks.list(TaskFilter::All).into_iter().cloned().collect();
    assert_eq!(reloaded_tasks, created_tasks);
    assert!(reloaded_tasks[1].completed);
    assert_eq!(sessions.latest(), Some(&session));
}

#[test]
fn attached_entry_may_reference_any_session() {
    let store = Store::in_memory();
    let mut sessions = SessionLog::open(store.clone());
    let mut entries = EntryRepository::open(store.clone());

    let no_session = entries
        .attach_to_session("Idea", "", sessions.latest())
        .unwrap()
        .into_inner();
    assert!(no_session.attached_to_session.is_none());

    let session = sessions
        .record(SessionCompleted {
            mode: TimerMode::Work,
            length_min: 25,
        })
        .into_inner();
    let linked = entries
        .attach_to_session("", "notes from the sprint", sessions.latest())
        .unwrap()
        .into_inner();
    assert_eq!(linked.attached_to_session, Some(session.id));

    let reloaded = EntryRepository::open(store);
    assert_eq!(reloaded.list().len(), 2);
    assert_eq!(reloaded.list()[1], linked);
}

#[test]
fn corrupt_collection_does_not_affect_others() {
    let dir = tempfile::tempdir().unwrap();
    let kv = Arc::new(SqliteKv::open(&dir.path().join("pomojournal.db")).unwrap());
    let store = Store::new(kv.clone());

    let mut tasks = TaskRepository::open(store.clone());
    tasks.create_batch(["survives"]).unwrap().into_inner();
    kv.set(Collection::Entries.key(), "[{\"id\": 12").unwrap();

    let entries = EntryRepository::open(store.clone());
    assert!(entries.is_empty());
    assert_eq!(TaskRepository::open(store).remaining(), 1);
}

/// Memory backend whose reads fail while `failing` is set.
struct FlakyReads {
    inner: MemoryKv,
    failing: AtomicBool,
}

impl KvBackend for FlakyReads {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Locked);
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

#[test]
fn read_failure_never_overwrites_stored_collection() {
    let kv = Arc::new(FlakyReads {
        inner: MemoryKv::new(),
        failing: AtomicBool::new(false),
    });
    let store = Store::new(kv.clone());
    let stored: Vec<Task> = TaskRepository::open(store.clone())
        .create_batch(["a", "b", "c"])
        .unwrap()
        .into_inner();

    kv.failing.store(true, Ordering::SeqCst);
    let mut tasks = TaskRepository::open(store.clone());
    let mut entries = EntryRepository::open(store.clone());
    let mut sessions = SessionLog::open(store.clone());
    kv.failing.store(false, Ordering::SeqCst);

    let added = tasks.create_batch(["new"]).unwrap();
    assert!(matches!(added.warning, Some(StorageError::Unreadable { .. })));
    assert_eq!(tasks.remaining(), 1);
    assert!(!entries.create("t", "c", vec![]).is_synced());
    let recorded = sessions.record(SessionCompleted {
        mode: TimerMode::Work,
        length_min: 25,
    });
    assert!(!recorded.is_synced());

    let reloaded = TaskRepository::open(store.clone());
    let reloaded: Vec<Task> = reloaded.list(TaskFilter::All).into_iter().cloned().collect();
    assert_eq!(reloaded, stored);
    assert!(EntryRepository::open(store.clone()).is_empty());
    assert!(SessionLog::open(store).list().is_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    /// Delete the n-th live entry (modulo count), or an unknown id.
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(Op::Create),
        (0usize..16).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn entries_reload_in_creation_order(ops in prop::collection::vec(op(), 0..40)) {
        let store = Store::in_memory();
        let mut repo = EntryRepository::open(store.clone());
        let mut expected = Vec::new();

        for op in ops {
            match op {
                Op::Create(title) => {
                    let entry = repo.create(title, "", vec![]).into_inner();
                    expected.push(entry);
                }
                Op::Delete(n) => {
                    if expected.is_empty() {
                        repo.delete("not-an-id").into_inner();
                    } else {
                        let victim = expected.remove(n % expected.len());
                        repo.delete(&victim.id).into_inner();
                    }
                }
            }
        }

        let reloaded = EntryRepository::open(store);
        prop_assert_eq!(reloaded.list(), expected.as_slice());
    }
}
