//! Pomodoro state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(cycles % 4 != 0)--> ShortBreak --> Work
//! Work --(cycles % 4 == 0)--> LongBreak  --> Work
//! ```
//!
//! [`advance`] is pure: it is evaluated once per elapsed second by whatever
//! drives the timer (the foreground driver, a test loop, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::TimerConfig;

/// Every this many completed work intervals, the break is a long one.
pub const LONG_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(self) -> bool {
        !matches!(self, TimerMode::Work)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "shortBreak",
            TimerMode::LongBreak => "longBreak",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient timer state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub completed_work_cycles: u32,
}

impl TimerState {
    /// Fresh state: work interval loaded, stopped, no cycles.
    pub fn initial(config: &TimerConfig) -> Self {
        Self {
            mode: TimerMode::Work,
            remaining_seconds: config.duration_secs(TimerMode::Work),
            is_running: false,
            completed_work_cycles: 0,
        }
    }
}

/// Emitted once for each finished work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCompleted {
    pub mode: TimerMode,
    pub length_min: u32,
}

/// Apply one elapsed second to `state`.
///
/// A non-zero countdown is decremented. A countdown already at zero moves to
/// the next interval and reloads its duration from `config`; leaving a work
/// interval counts a cycle and yields a [`SessionCompleted`].
pub fn advance(state: TimerState, config: &TimerConfig) -> (TimerState, Option<SessionCompleted>) {
    if state.remaining_seconds > 0 {
        return (
            TimerState {
                remaining_seconds: state.remaining_seconds - 1,
                ..state
            },
            None,
        );
    }

    let mut next = state;
    let mut completed = None;
    next.mode = match state.mode {
        TimerMode::Work => {
            next.completed_work_cycles = state.completed_work_cycles.saturating_add(1);
            completed = Some(SessionCompleted {
                mode: TimerMode::Work,
                length_min: config.minutes(TimerMode::Work),
            });
            if next.completed_work_cycles % LONG_BREAK_EVERY == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        }
        TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
    };
    next.remaining_seconds = config.duration_secs(next.mode);
    (next, completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_zero(mode: TimerMode, cycles: u32) -> TimerState {
        TimerState {
            mode,
            remaining_seconds: 0,
            is_running: true,
            completed_work_cycles: cycles,
        }
    }

    #[test]
    fn decrements_without_changing_mode() {
        let cfg = TimerConfig::default();
        let state = TimerState::initial(&cfg);
        let (next, event) = advance(state, &cfg);
        assert_eq!(next.remaining_seconds, 1499);
        assert_eq!(next.mode, TimerMode::Work);
        assert!(event.is_none());
    }

    #[test]
    fn work_end_emits_session_and_goes_to_short_break() {
        let cfg = TimerConfig::new(30, 7, 20);
        let (next, event) = advance(at_zero(TimerMode::Work, 0), &cfg);
        assert_eq!(next.mode, TimerMode::ShortBreak);
        assert_eq!(next.remaining_seconds, 7 * 60);
        assert_eq!(next.completed_work_cycles, 1);
        assert_eq!(
            event,
            Some(SessionCompleted {
                mode: TimerMode::Work,
                length_min: 30
            })
        );
    }

    #[test]
    fn every_fourth_cycle_takes_long_break() {
        let cfg = TimerConfig::default();
        let (next, _) = advance(at_zero(TimerMode::Work, 3), &cfg);
        assert_eq!(next.mode, TimerMode::LongBreak);
        assert_eq!(next.remaining_seconds, 900);

        let (next, _) = advance(at_zero(TimerMode::Work, 7), &cfg);
        assert_eq!(next.mode, TimerMode::LongBreak);

        let (next, _) = advance(at_zero(TimerMode::Work, 4), &cfg);
        assert_eq!(next.mode, TimerMode::ShortBreak);
    }

    #[test]
    fn break_end_returns_to_work_without_counting() {
        let cfg = TimerConfig::default();
        for mode in [TimerMode::ShortBreak, TimerMode::LongBreak] {
            let (next, event) = advance(at_zero(mode, 2), &cfg);
            assert_eq!(next.mode, TimerMode::Work);
            assert_eq!(next.remaining_seconds, 1500);
            assert_eq!(next.completed_work_cycles, 2);
            assert!(event.is_none());
        }
    }

    #[test]
    fn mode_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&TimerMode::ShortBreak).unwrap(),
            "\"shortBreak\""
        );
        assert_eq!(TimerMode::LongBreak.to_string(), "longBreak");
    }
}
