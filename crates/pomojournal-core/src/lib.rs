//! # Pomojournal Core Library
//!
//! Business logic for Pomojournal: a text journal, a Pomodoro timer, and a
//! task checklist persisted to a local key-value store. Front ends (the CLI
//! binary today) read user input, call into this crate, and render the
//! returned state.
//!
//! ## Architecture
//!
//! - **Storage**: three independent JSON collections in key-value slots,
//!   backed by SQLite on disk or a map in memory
//! - **Repositories**: one per collection, each owning its records and
//!   writing the whole collection back after every mutation
//! - **Timer Engine**: a pure per-second state machine plus a foreground
//!   driver that ticks it while running
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: work / short break / long break cycling
//! - [`EntryRepository`], [`TaskRepository`], [`SessionLog`]
//! - [`Store`]: collection persistence with corrupt-data recovery
//! - [`Config`]: TOML configuration for interval lengths

pub mod error;
pub mod events;
pub mod journal;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, StorageError, ValidationError};
pub use events::Event;
pub use journal::{EntryRepository, JournalEntry};
pub use session::{PomodoroSession, SessionLog};
pub use storage::{Collection, Config, KvBackend, MemoryKv, Persisted, SqliteKv, Store};
pub use task::{Task, TaskFilter, TaskRepository};
pub use timer::{advance, PomodoroTimer, SessionCompleted, TimerConfig, TimerMode, TimerState};
