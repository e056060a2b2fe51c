mod config;
mod driver;
mod engine;
mod state;

pub use config::{
    parse_minutes, TimerConfig, DEFAULT_LONG_BREAK_MIN, DEFAULT_SHORT_BREAK_MIN, DEFAULT_WORK_MIN,
};
pub use driver::{run_foreground, DriveOptions, DriveSummary};
pub use engine::{format_clock, PomodoroTimer};
pub use state::{advance, SessionCompleted, TimerMode, TimerState, LONG_BREAK_EVERY};
