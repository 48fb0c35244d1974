//! Attendance calculation result models.
//!
//! This module contains the [`DailyCalculation`] and [`MonthlySummary`] types
//! produced by the attendance calculator. Both are derived values: they are
//! recomputed from punches on demand and never partially persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::minutes_to_day_equivalent;

/// The tardiness and undertime derived from one day's punches.
///
/// Punch strings are echoed verbatim for display. When `is_excused` is set,
/// both minute counts are zero and `is_incomplete` is false.
///
/// # Example
///
/// ```
/// use hr_engine::models::DailyCalculation;
/// use chrono::NaiveDate;
///
/// let day = DailyCalculation {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     morning_in: Some("08:15".to_string()),
///     morning_out: Some("12:00".to_string()),
///     afternoon_in: Some("13:00".to_string()),
///     afternoon_out: Some("16:45".to_string()),
///     tardiness_minutes: 15,
///     undertime_minutes: 15,
///     is_incomplete: false,
///     is_excused: false,
///     remark: None,
/// };
/// assert_eq!(day.total_minutes(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCalculation {
    /// Identifier of the employee.
    pub employee_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// Morning arrival as captured.
    pub morning_in: Option<String>,
    /// Morning departure as captured.
    pub morning_out: Option<String>,
    /// Afternoon arrival as captured.
    pub afternoon_in: Option<String>,
    /// Afternoon departure as captured.
    pub afternoon_out: Option<String>,
    /// Minutes arrived after session start, summed over both sessions.
    pub tardiness_minutes: u32,
    /// Minutes left before session end plus fully missed sessions.
    pub undertime_minutes: u32,
    /// Set when the punches are partial or the whole day is empty.
    pub is_incomplete: bool,
    /// Set when the remark matched an excuse keyword.
    pub is_excused: bool,
    /// The remark, passed through unchanged.
    pub remark: Option<String>,
}

impl DailyCalculation {
    /// Tardiness plus undertime for the day.
    pub fn total_minutes(&self) -> u32 {
        self.tardiness_minutes + self.undertime_minutes
    }
}

/// An ordered run of daily calculations with their totals.
///
/// Days appear in the order the punches were supplied; the engine does not
/// sort, deduplicate or fill gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The per-day results in input order.
    pub days: Vec<DailyCalculation>,
    /// Sum of `tardiness_minutes` across `days`.
    pub total_tardiness: u32,
    /// Sum of `undertime_minutes` across `days`.
    pub total_undertime: u32,
}

impl MonthlySummary {
    /// Number of days flagged for human review.
    pub fn incomplete_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_incomplete).count()
    }

    /// Number of days covered by an excuse remark.
    pub fn excused_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_excused).count()
    }

    /// Total tardiness and undertime as leave-credit day equivalents.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::MonthlySummary;
    /// use rust_decimal::Decimal;
    ///
    /// let summary = MonthlySummary {
    ///     days: vec![],
    ///     total_tardiness: 45,
    ///     total_undertime: 15,
    /// };
    /// assert_eq!(summary.day_equivalent(), Decimal::new(125, 3));
    /// ```
    pub fn day_equivalent(&self) -> Decimal {
        minutes_to_day_equivalent(self.total_tardiness + self.total_undertime)
    }
}
