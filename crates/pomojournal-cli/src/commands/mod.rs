pub mod config;
pub mod entry;
pub mod session;
pub mod task;
pub mod timer;

use chrono::{DateTime, Local, Utc};
use pomojournal_core::Persisted;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Unwrap a repository result, telling the user when the write failed.
pub fn report<T>(persisted: Persisted<T>) -> T {
    if let Some(warning) = &persisted.warning {
        eprintln!("warning: {warning}; the change was not saved");
    }
    persisted.into_inner()
}

pub fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
