use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// The front end renders them; the session log consumes `SessionCompleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    /// A work interval ran to zero.
    SessionCompleted {
        mode: TimerMode,
        length_min: u32,
        at: DateTime<Utc>,
    },
    /// The timer moved on to the next interval.
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        duration_secs: u64,
        completed_work_cycles: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        remaining_seconds: u64,
        is_running: bool,
        completed_work_cycles: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// `true` for the event that should be appended to the session log.
    pub fn is_session_completed(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }
}
