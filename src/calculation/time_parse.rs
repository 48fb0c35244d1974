//! Lenient parsing of time-clock punch strings.
//!
//! Punches come from time clocks and from manual transcription, so the
//! parser never fails: anything it cannot read is a missing punch.

use chrono::NaiveTime;

use crate::config::minute_of_day;

/// Parses a punch string into minutes since midnight.
///
/// Accepts `HH:MM` and `HH:MM:SS` after trimming whitespace; seconds are
/// truncated. Empty, missing or unparseable values yield `None`.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::parse_punch_minute;
///
/// assert_eq!(parse_punch_minute(Some("08:15")), Some(495));
/// assert_eq!(parse_punch_minute(Some("08:15:59")), Some(495));
/// assert_eq!(parse_punch_minute(Some("late")), None);
/// assert_eq!(parse_punch_minute(None), None);
/// ```
pub fn parse_punch_minute(raw: Option<&str>) -> Option<u32> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"));

    match parsed {
        Ok(time) => Some(minute_of_day(time)),
        Err(err) => {
            tracing::debug!(value = %trimmed, error = %err, "Unreadable punch treated as missing");
            None
        }
    }
}
