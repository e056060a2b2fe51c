//! Timer engine implementation.
//!
//! The engine owns a [`TimerState`] and the active [`TimerConfig`]. It does
//! not use internal threads - the caller is responsible for calling `tick()`
//! once per elapsed second while the timer is running.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PomodoroTimer::new(TimerConfig::default());
//! timer.start();
//! // Once per second:
//! for event in timer.tick() { /* render, record sessions */ }
//! ```

use chrono::Utc;
use tracing::{debug, info};

use super::config::TimerConfig;
use super::state::{advance, TimerMode, TimerState};
use crate::events::Event;

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    config: TimerConfig,
    state: TimerState,
}

impl PomodoroTimer {
    /// Create a stopped timer with the work interval loaded.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            state: TimerState::initial(&config),
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.state.completed_work_cycles
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            is_running: self.state.is_running,
            completed_work_cycles: self.state.completed_work_cycles,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin advancing. Returns `None` if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running {
            return None;
        }
        self.state.is_running = true;
        debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Stop advancing, keeping mode and remaining time. Returns `None` if
    /// the timer was not running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.is_running = false;
        debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Return to a stopped work interval with no cycles counted. Progress
    /// in the current interval is dropped.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::initial(&self.config);
        debug!("timer reset");
        Event::TimerReset {
            remaining_seconds: self.state.remaining_seconds,
            at: Utc::now(),
        }
    }

    /// Replace the durations. The interval in progress keeps its remaining
    /// time; the new values apply from the next load (transition or reset).
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
    }

    /// Apply one elapsed second. Does nothing while stopped.
    ///
    /// Returns `SessionCompleted` (work intervals only) followed by
    /// `ModeChanged` when the countdown rolls over.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.state.is_running {
            return Vec::new();
        }
        let from = self.state.mode;
        let (next, completed) = advance(self.state, &self.config);
        self.state = next;

        let mut events = Vec::new();
        let at = Utc::now();
        if let Some(done) = completed {
            info!(
                length_min = done.length_min,
                cycles = next.completed_work_cycles,
                "work session completed"
            );
            events.push(Event::SessionCompleted {
                mode: done.mode,
                length_min: done.length_min,
                at,
            });
        }
        if next.mode != from {
            info!(from = %from, to = %next.mode, "timer mode changed");
            events.push(Event::ModeChanged {
                from,
                to: next.mode,
                duration_secs: next.remaining_seconds,
                completed_work_cycles: next.completed_work_cycles,
                at,
            });
        }
        events
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

/// `MM:SS` rendering of a countdown.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
