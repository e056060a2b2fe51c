mod config;
pub mod kv;
pub mod store;

pub use config::Config;
pub use kv::{KvBackend, MemoryKv, SqliteKv};
pub use store::{Collection, Persisted, Store};
pub(crate) use store::Loaded;

use std::path::PathBuf;

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::StorageError;

/// Current time at the millisecond precision collections are stored with.
///
/// Records stamped with this compare equal to themselves after a reload.
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// - `POMOJOURNAL_HOME` when set, used verbatim
/// - `~/.config/pomojournal-dev/` when `POMOJOURNAL_ENV=dev`
/// - `~/.config/pomojournal/` otherwise
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("POMOJOURNAL_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOJOURNAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomojournal-dev")
            } else {
                base_dir.join("pomojournal")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
