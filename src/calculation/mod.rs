//! Attendance time-accounting for the HR engine.
//!
//! This module contains the calculator that turns raw twice-daily
//! time-clock punches into tardiness and undertime minutes: lenient punch
//! parsing, the per-day session rules, monthly aggregation, and the
//! minutes-to-day-equivalent conversion used for leave-credit deductions.

mod daily_attendance;
mod monthly_attendance;
mod time_parse;

pub use daily_attendance::{calculate_daily_attendance, calculate_daily_attendance_with_policy};
pub use monthly_attendance::{
    MINUTES_PER_WORKDAY, calculate_monthly_attendance, calculate_monthly_attendance_with_policy,
    minutes_to_day_equivalent,
};
pub use time_parse::parse_punch_minute;
