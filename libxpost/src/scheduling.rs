//! Daily schedule parsing and due-time tracking
//!
//! Scheduled mode fires at a fixed set of wall-clock times each day. The
//! times come in as a comma-separated list of `HH:MM` strings and are
//! validated up front; a malformed entry is fatal before the poll loop
//! starts. Due-time detection is separated from real time behind the
//! `Clock` trait so tests can drive it without sleeping.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};

use crate::error::{Result, ScheduleError};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Parse a comma-separated list of daily posting times
///
/// Each entry must be exactly `HH:MM` with zero padding (`09:00`, not
/// `9:00`) and a valid hour/minute.
///
/// # Errors
///
/// Returns `ScheduleError::InvalidTimeFormat` naming the first entry that
/// does not parse.
pub fn parse_times(csv: &str) -> Result<Vec<NaiveTime>> {
    csv.split(',').map(|entry| parse_time(entry.trim())).collect()
}

fn parse_time(entry: &str) -> Result<NaiveTime> {
    let invalid = || ScheduleError::InvalidTimeFormat(entry.to_string());

    // chrono is lenient about padding, so enforce the canonical shape first
    let shape_ok = entry.len() == 5
        && entry.as_bytes()[2] == b':'
        && entry[..2].bytes().all(|b| b.is_ascii_digit())
        && entry[3..].bytes().all(|b| b.is_ascii_digit());
    if !shape_ok {
        return Err(invalid().into());
    }

    NaiveTime::parse_from_str(entry, "%H:%M").map_err(|_| invalid().into())
}

/// Tracks which of the configured daily times have fired today
///
/// A time fires at most once per calendar day, the first time the clock is
/// observed at or past it. Times already in the past when the schedule is
/// created are treated as fired, so starting the tool at 14:00 does not
/// immediately flush the morning slots.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    time: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl DailySchedule {
    pub fn new(times: Vec<NaiveTime>, now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        let entries = times
            .into_iter()
            .map(|time| Entry {
                last_fired: (now.time() >= time).then_some(today),
                time,
            })
            .collect();
        Self { entries }
    }

    /// Return the times that become due at `now`, marking them fired
    pub fn due(&mut self, now: DateTime<Local>) -> Vec<NaiveTime> {
        let today = now.date_naive();
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            if now.time() >= entry.time && entry.last_fired != Some(today) {
                entry.last_fired = Some(today);
                fired.push(entry.time);
            }
        }
        fired
    }

    pub fn times(&self) -> Vec<NaiveTime> {
        self.entries.iter().map(|e| e.time).collect()
    }
}
