//! Foreground tick driver.
//!
//! Advances a [`PomodoroTimer`] once per period while it runs, until a tick
//! limit is reached or the `stop` future resolves. Stopping pauses the timer,
//! so a later run resumes exactly where this one left off.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::engine::PomodoroTimer;
use crate::events::Event;

/// Options for [`run_foreground`].
#[derive(Debug, Clone, Copy)]
pub struct DriveOptions {
    /// Time between ticks. One second outside of tests.
    pub period: Duration,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            max_ticks: None,
        }
    }
}

/// What happened during one [`run_foreground`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveSummary {
    pub ticks: u64,
    pub sessions_completed: u32,
}

/// Drive `timer` until `options.max_ticks` or `stop`.
///
/// `on_update` sees the timer after every start, tick, and pause together
/// with the events that step produced (possibly none).
pub async fn run_foreground<S, F>(
    timer: &mut PomodoroTimer,
    options: DriveOptions,
    stop: S,
    mut on_update: F,
) -> DriveSummary
where
    S: Future<Output = ()>,
    F: FnMut(&PomodoroTimer, &[Event]),
{
    let mut summary = DriveSummary::default();

    let started: Vec<Event> = timer.start().into_iter().collect();
    on_update(timer, &started);

    let mut ticker = interval(options.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    ticker.tick().await;

    tokio::pin!(stop);
    loop {
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                let events = timer.tick();
                summary.ticks += 1;
                summary.sessions_completed += events
                    .iter()
                    .filter(|e| e.is_session_completed())
                    .count() as u32;
                on_update(timer, &events);
            }
            _ = &mut stop => {
                debug!(ticks = summary.ticks, "stop requested");
                break;
            }
        }
    }

    let paused: Vec<Event> = timer.pause().into_iter().collect();
    on_update(timer, &paused);
    summary
}
