//! Interval durations for the Pomodoro timer.
//!
//! Durations are whole positive minutes. Anything else, whether missing,
//! zero, negative, or non-numeric, resolves to the default for that interval
//! instead of reaching the state machine.

use serde::{Deserialize, Deserializer, Serialize};

use super::state::TimerMode;

pub const DEFAULT_WORK_MIN: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
pub const DEFAULT_LONG_BREAK_MIN: u32 = 15;

/// Configured interval lengths, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work", deserialize_with = "de_work")]
    pub work_min: u32,
    #[serde(default = "default_short", deserialize_with = "de_short")]
    pub short_break_min: u32,
    #[serde(default = "default_long", deserialize_with = "de_long")]
    pub long_break_min: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_min: DEFAULT_WORK_MIN,
            short_break_min: DEFAULT_SHORT_BREAK_MIN,
            long_break_min: DEFAULT_LONG_BREAK_MIN,
        }
    }
}

impl TimerConfig {
    /// Build from numeric minutes; zero falls back to the default.
    pub fn new(work_min: u32, short_break_min: u32, long_break_min: u32) -> Self {
        Self {
            work_min: positive_or(work_min, DEFAULT_WORK_MIN),
            short_break_min: positive_or(short_break_min, DEFAULT_SHORT_BREAK_MIN),
            long_break_min: positive_or(long_break_min, DEFAULT_LONG_BREAK_MIN),
        }
    }

    /// Build from free-form user input such as form fields or CLI flags.
    pub fn from_raw(work: &str, short_break: &str, long_break: &str) -> Self {
        Self {
            work_min: parse_minutes(work).unwrap_or(DEFAULT_WORK_MIN),
            short_break_min: parse_minutes(short_break).unwrap_or(DEFAULT_SHORT_BREAK_MIN),
            long_break_min: parse_minutes(long_break).unwrap_or(DEFAULT_LONG_BREAK_MIN),
        }
    }

    /// Configured length of `mode` in minutes.
    pub fn minutes(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_min,
            TimerMode::ShortBreak => self.short_break_min,
            TimerMode::LongBreak => self.long_break_min,
        }
    }

    /// Configured length of `mode` in seconds.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        u64::from(self.minutes(mode)).saturating_mul(60)
    }
}

/// Parse the leading integer of `raw`, ignoring surrounding whitespace and
/// trailing garbage (`"12min"` is 12). Returns `None` unless the result is
/// positive.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return None;
    }
    let value: u32 = digits[..end].parse().ok()?;
    (value > 0).then_some(value)
}

fn positive_or(value: u32, default: u32) -> u32 {
    if value > 0 {
        value
    } else {
        default
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl RawMinutes {
    fn resolve(self, default: u32) -> u32 {
        match self {
            RawMinutes::Int(n) => u32::try_from(n).ok().filter(|n| *n > 0).unwrap_or(default),
            RawMinutes::Float(f) if f.is_finite() && f >= 1.0 && f <= f64::from(u32::MAX) => {
                f.trunc() as u32
            }
            RawMinutes::Float(_) | RawMinutes::Bool(_) => default,
            RawMinutes::Text(s) => parse_minutes(&s).unwrap_or(default),
        }
    }
}

fn lenient<'de, D: Deserializer<'de>>(deserializer: D, default: u32) -> Result<u32, D::Error> {
    Ok(RawMinutes::deserialize(deserializer)?.resolve(default))
}

fn de_work<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient(d, DEFAULT_WORK_MIN)
}
fn de_short<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient(d, DEFAULT_SHORT_BREAK_MIN)
}
fn de_long<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient(d, DEFAULT_LONG_BREAK_MIN)
}
fn default_work() -> u32 {
    DEFAULT_WORK_MIN
}
fn default_short() -> u32 {
    DEFAULT_SHORT_BREAK_MIN
}
fn default_long() -> u32 {
    DEFAULT_LONG_BREAK_MIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minutes_follows_leading_integer() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("  7 "), Some(7));
        assert_eq!(parse_minutes("12min"), Some(12));
        assert_eq!(parse_minutes("25.9"), Some(25));
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-5"), None);
    }

    #[test]
    fn from_raw_falls_back_per_field() {
        let cfg = TimerConfig::from_raw("50", "abc", "");
        assert_eq!(cfg, TimerConfig::new(50, 5, 15));
    }

    #[test]
    fn new_replaces_zero_with_default() {
        let cfg = TimerConfig::new(0, 0, 30);
        assert_eq!(cfg.work_min, 25);
        assert_eq!(cfg.short_break_min, 5);
        assert_eq!(cfg.long_break_min, 30);
    }

    #[test]
    fn durations_are_in_seconds() {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.duration_secs(TimerMode::Work), 1500);
        assert_eq!(cfg.duration_secs(TimerMode::ShortBreak), 300);
        assert_eq!(cfg.duration_secs(TimerMode::LongBreak), 900);
    }

    #[test]
    fn lenient_deserialization_never_fails_on_bad_numbers() {
        let cfg: TimerConfig = serde_json::from_str(
            r#"{"work_min": "forty", "short_break_min": -3, "long_break_min": "20"}"#,
        )
        .unwrap();
        assert_eq!(cfg, TimerConfig::new(25, 5, 20));

        let cfg: TimerConfig = serde_json::from_str(r#"{"work_min": 45.5}"#).unwrap();
        assert_eq!(cfg, TimerConfig::new(45, 5, 15));
    }
}
