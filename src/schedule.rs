//! Day-indexed message selection.
//!
//! "Today" is always passed in. [`today_in`] is the only place the reference
//! timezone is applied, so the rest of this module works on plain calendar
//! dates and is fully deterministic.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Calendar date of `now` in `tz`.
pub fn today_in<Z: TimeZone>(now: DateTime<Utc>, tz: &Z) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Whole calendar days from `start` to `today`. Negative before `start`.
pub fn day_index(start: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(start).num_days()
}

/// Why [`select_message`] returned no message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// `today` is before the start date.
    #[error("run starts on {starts_on}")]
    NotStarted {
        /// First posting day.
        starts_on: NaiveDate,
    },
    /// Day index is past the last postable day.
    #[error("run complete at day index {day_index}")]
    RunComplete {
        /// Zero-based day index of `today`.
        day_index: i64,
    },
    /// The message list is empty.
    #[error("message list is empty")]
    EmptySource,
}

/// Message for `today`, if `today` is inside the active window
/// `[0, min(messages.len(), max_days))`.
///
/// # Errors
///
/// [`SelectError::EmptySource`] for an empty list, [`SelectError::NotStarted`]
/// before `start`, [`SelectError::RunComplete`] past the window.
pub fn select_message<'a, S: AsRef<str>>(
    today: NaiveDate,
    start: NaiveDate,
    max_days: u32,
    messages: &'a [S],
) -> Result<&'a str, SelectError> {
    if messages.is_empty() {
        return Err(SelectError::EmptySource);
    }
    let idx = day_index(start, today);
    if idx < 0 {
        return Err(SelectError::NotStarted { starts_on: start });
    }
    let limit = messages.len().min(max_days as usize);
    match usize::try_from(idx) {
        Ok(i) if i < limit => Ok(messages[i].as_ref()),
        _ => Err(SelectError::RunComplete { day_index: idx }),
    }
}

/// Where `today` falls relative to the posting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// A message is due.
    Active {
        /// Zero-based day index.
        day_index: i64,
        /// Selected line, verbatim.
        message: String,
    },
    /// `today` is before the start date.
    NotStarted {
        /// First posting day.
        starts_on: NaiveDate,
    },
    /// Inside `[0, max_days)` but the message list has run out.
    SourceExhausted {
        /// Zero-based day index.
        day_index: i64,
        /// Number of messages available.
        available: usize,
    },
    /// The day right after the last scheduled post (`day_index == max_days`).
    JustCompleted {
        /// Equals `max_days`.
        day_index: i64,
    },
    /// Any later day.
    AlreadyCompleted {
        /// Zero-based day index, greater than `max_days`.
        day_index: i64,
    },
}

impl RunState {
    /// Short machine-readable name of the state.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active { .. } => "active",
            Self::NotStarted { .. } => "not_started",
            Self::SourceExhausted { .. } => "source_exhausted",
            Self::JustCompleted { .. } => "just_completed",
            Self::AlreadyCompleted { .. } => "already_completed",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active { day_index, .. } => write!(f, "active, day {}", day_index + 1),
            Self::NotStarted { starts_on } => write!(f, "not started, first post on {starts_on}"),
            Self::SourceExhausted {
                day_index,
                available,
            } => write!(
                f,
                "day {} but only {available} messages available",
                day_index + 1
            ),
            Self::JustCompleted { .. } => write!(f, "run just completed"),
            Self::AlreadyCompleted { day_index } => {
                write!(f, "run already completed ({day_index} days since start)")
            }
        }
    }
}

/// Classify `today` against a sequential run.
///
/// The completion states are evaluated before exhaustion, so a short message
/// list still yields exactly one `JustCompleted` day at `max_days`.
pub fn classify<S: AsRef<str>>(
    today: NaiveDate,
    start: NaiveDate,
    max_days: u32,
    messages: &[S],
) -> RunState {
    let day_index = day_index(start, today);
    let max = i64::from(max_days);

    if day_index < 0 {
        return RunState::NotStarted { starts_on: start };
    }
    if day_index == max {
        return RunState::JustCompleted { day_index };
    }
    if day_index > max {
        return RunState::AlreadyCompleted { day_index };
    }
    match select_message(today, start, max_days, messages) {
        Ok(message) => RunState::Active {
            day_index,
            message: message.to_owned(),
        },
        Err(_) => RunState::SourceExhausted {
            day_index,
            available: messages.len(),
        },
    }
}

/// Index for rotate mode: the date's proleptic Gregorian ordinal
/// (0001-01-01 is 1) modulo `len`. `None` when `len` is 0.
pub fn rotating_index(today: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let ordinal = i64::from(today.num_days_from_ce());
    usize::try_from(ordinal.rem_euclid(len as i64)).ok()
}
