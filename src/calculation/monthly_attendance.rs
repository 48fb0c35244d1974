//! Monthly attendance aggregation.
//!
//! This module runs the daily calculator over a caller-supplied list of
//! punches and totals the results, plus the conversion of minutes into
//! leave-credit day equivalents.

use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{DailyCalculation, DailyPunch, MonthlySummary};

use super::{calculate_daily_attendance, calculate_daily_attendance_with_policy};

/// Minutes in one eight-hour work day.
pub const MINUTES_PER_WORKDAY: u32 = 480;

/// Summarises a run of days under the civil-service rules.
///
/// Days are calculated in input order and the output preserves that order.
/// No sorting, deduplication or gap filling is performed.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_monthly_attendance;
/// use hr_engine::models::DailyPunch;
/// use chrono::NaiveDate;
///
/// let mut late = DailyPunch::empty("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// late.morning_in = Some("08:10".to_string());
/// late.morning_out = Some("12:00".to_string());
/// late.afternoon_in = Some("13:00".to_string());
/// late.afternoon_out = Some("17:00".to_string());
///
/// let mut half_day = late.clone();
/// half_day.date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
/// half_day.afternoon_in = None;
/// half_day.afternoon_out = None;
///
/// let summary = calculate_monthly_attendance(&[late, half_day]);
/// assert_eq!(summary.total_tardiness, 20);
/// assert_eq!(summary.total_undertime, 240);
/// ```
pub fn calculate_monthly_attendance(punches: &[DailyPunch]) -> MonthlySummary {
    summarise(punches.iter().map(calculate_daily_attendance).collect())
}

/// Summarises a run of days under the given policy.
pub fn calculate_monthly_attendance_with_policy(
    punches: &[DailyPunch],
    policy: &AttendancePolicy,
) -> MonthlySummary {
    summarise(
        punches
            .iter()
            .map(|p| calculate_daily_attendance_with_policy(p, policy))
            .collect(),
    )
}

fn summarise(days: Vec<DailyCalculation>) -> MonthlySummary {
    let total_tardiness = days.iter().map(|d| d.tardiness_minutes).sum();
    let total_undertime = days.iter().map(|d| d.undertime_minutes).sum();

    MonthlySummary {
        days,
        total_tardiness,
        total_undertime,
    }
}

/// Converts minutes of tardiness/undertime into day equivalents.
///
/// The result is `minutes / 480` rounded to three decimal places with
/// banker's rounding, which reproduces the civil-service conversion table
/// (e.g. 30 minutes = 0.062, 45 minutes = 0.094).
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::minutes_to_day_equivalent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_day_equivalent(60), Decimal::new(125, 3));
/// assert_eq!(minutes_to_day_equivalent(480), Decimal::ONE);
/// ```
pub fn minutes_to_day_equivalent(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(MINUTES_PER_WORKDAY)).round_dp(3)
}
