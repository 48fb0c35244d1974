//! Daily tardiness and undertime calculation.
//!
//! This module converts one day's four time-clock punches into minutes of
//! tardiness and undertime against the official morning and afternoon
//! sessions, flagging days whose punches are too sparse to judge.

use std::sync::LazyLock;

use crate::config::{AttendancePolicy, SessionWindow};
use crate::models::{DailyCalculation, DailyPunch};

use super::parse_punch_minute;

static CIVIL_SERVICE_POLICY: LazyLock<AttendancePolicy> = LazyLock::new(AttendancePolicy::default);

/// Parsed in/out punches for one session, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionPunches {
    time_in: Option<u32>,
    time_out: Option<u32>,
}

impl SessionPunches {
    fn parse(time_in: &Option<String>, time_out: &Option<String>) -> Self {
        Self {
            time_in: parse_punch_minute(time_in.as_deref()),
            time_out: parse_punch_minute(time_out.as_deref()),
        }
    }

    fn has_any(&self) -> bool {
        self.time_in.is_some() || self.time_out.is_some()
    }
}

/// What one session contributes to the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SessionCharge {
    tardiness: u32,
    undertime: u32,
    incomplete: bool,
}

/// Evaluates one session against its official window.
///
/// `other_session_worked` is whether the opposite session has any readable
/// punch; it decides how a fully unpunched session is treated.
fn evaluate_session(
    window: &SessionWindow,
    punches: SessionPunches,
    other_session_worked: bool,
) -> SessionCharge {
    let late_by = |time_in: u32| time_in.saturating_sub(window.start_minute());
    let early_by = |time_out: u32| window.end_minute().saturating_sub(time_out);

    match (punches.time_in, punches.time_out) {
        (Some(time_in), Some(time_out)) => SessionCharge {
            tardiness: late_by(time_in),
            undertime: early_by(time_out),
            incomplete: false,
        },
        // Half-day absence: the other session was worked, so this one was missed.
        (None, None) if other_session_worked => SessionCharge {
            tardiness: 0,
            undertime: window.duration_minutes(),
            incomplete: false,
        },
        // Nothing recorded all day: absence and data-entry gap look the same.
        (None, None) => SessionCharge {
            incomplete: true,
            ..SessionCharge::default()
        },
        (Some(time_in), None) => SessionCharge {
            tardiness: late_by(time_in),
            undertime: 0,
            incomplete: true,
        },
        (None, Some(time_out)) => SessionCharge {
            tardiness: 0,
            undertime: early_by(time_out),
            incomplete: true,
        },
    }
}

/// Calculates tardiness and undertime for one day under the civil-service rules.
///
/// Uses the fixed 08:00-12:00 and 13:00-17:00 sessions and the excuse
/// keywords "Leave", "OB" and "Absent". See
/// [`calculate_daily_attendance_with_policy`] for the algorithm.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::calculate_daily_attendance;
/// use hr_engine::models::DailyPunch;
/// use chrono::NaiveDate;
///
/// let punch = DailyPunch {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     morning_in: Some("08:15".to_string()),
///     morning_out: Some("12:00".to_string()),
///     afternoon_in: Some("13:00".to_string()),
///     afternoon_out: Some("16:45".to_string()),
///     remark: None,
/// };
///
/// let day = calculate_daily_attendance(&punch);
/// assert_eq!(day.tardiness_minutes, 15);
/// assert_eq!(day.undertime_minutes, 15);
/// assert!(!day.is_incomplete);
/// ```
pub fn calculate_daily_attendance(punch: &DailyPunch) -> DailyCalculation {
    calculate_daily_attendance_with_policy(punch, &CIVIL_SERVICE_POLICY)
}

/// Calculates tardiness and undertime for one day under the given policy.
///
/// # Algorithm
///
/// 1. A remark containing an excuse keyword (case-insensitive) yields zero
///    minutes and a complete day, whatever the punches say.
/// 2. Each session is evaluated independently:
///    - in and out present: lateness of the in-punch is tardiness, earliness
///      of the out-punch is undertime;
///    - both absent while the other session has a punch: the full session
///      length is undertime;
///    - both absent and the other session also empty: nothing is charged and
///      the day is flagged incomplete;
///    - exactly one present: the day is flagged incomplete and the present
///      punch is still checked for lateness or earliness.
/// 3. Tardiness and undertime are summed across sessions.
///
/// Unreadable punch strings count as missing. The function never fails.
pub fn calculate_daily_attendance_with_policy(
    punch: &DailyPunch,
    policy: &AttendancePolicy,
) -> DailyCalculation {
    let mut result = DailyCalculation {
        employee_id: punch.employee_id.clone(),
        date: punch.date,
        morning_in: punch.morning_in.clone(),
        morning_out: punch.morning_out.clone(),
        afternoon_in: punch.afternoon_in.clone(),
        afternoon_out: punch.afternoon_out.clone(),
        tardiness_minutes: 0,
        undertime_minutes: 0,
        is_incomplete: false,
        is_excused: false,
        remark: punch.remark.clone(),
    };

    if punch.remark.as_deref().is_some_and(|r| policy.is_excused(r)) {
        tracing::debug!(
            employee_id = %punch.employee_id,
            date = %punch.date,
            "Day excused by remark"
        );
        result.is_excused = true;
        return result;
    }

    let morning = SessionPunches::parse(&punch.morning_in, &punch.morning_out);
    let afternoon = SessionPunches::parse(&punch.afternoon_in, &punch.afternoon_out);

    let charges = [
        evaluate_session(&policy.morning, morning, afternoon.has_any()),
        evaluate_session(&policy.afternoon, afternoon, morning.has_any()),
    ];

    for charge in charges {
        result.tardiness_minutes += charge.tardiness;
        result.undertime_minutes += charge.undertime;
        result.is_incomplete |= charge.incomplete;
    }

    if result.is_incomplete {
        tracing::debug!(
            employee_id = %punch.employee_id,
            date = %punch.date,
            "Day flagged incomplete"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_punch(
        morning_in: Option<&str>,
        morning_out: Option<&str>,
        afternoon_in: Option<&str>,
        afternoon_out: Option<&str>,
    ) -> DailyPunch {
        DailyPunch {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            morning_in: morning_in.map(str::to_string),
            morning_out: morning_out.map(str::to_string),
            afternoon_in: afternoon_in.map(str::to_string),
            afternoon_out: afternoon_out.map(str::to_string),
            remark: None,
        }
    }

    fn with_remark(mut punch: DailyPunch, remark: &str) -> DailyPunch {
        punch.remark = Some(remark.to_string());
        punch
    }

    // ==========================================================================
    // Complete days
    // ==========================================================================

    #[test]
    fn test_on_time_day_has_no_charges() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:00"),
            Some("12:00"),
            Some("13:00"),
            Some("17:00"),
        ));

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);
        assert!(!day.is_incomplete);
        assert!(!day.is_excused);
    }

    #[test]
    fn test_late_morning_and_early_afternoon_departure() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:15"),
            Some("12:00"),
            Some("13:00"),
            Some("16:45"),
        ));

        assert_eq!(day.tardiness_minutes, 15);
        assert_eq!(day.undertime_minutes, 15);
        assert!(!day.is_incomplete);
    }

    #[test]
    fn test_early_arrival_and_late_departure_earn_nothing() {
        let day = calculate_daily_attendance(&make_punch(
            Some("07:30"),
            Some("12:30"),
            Some("12:45"),
            Some("18:10"),
        ));

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);
    }

    #[test]
    fn test_lateness_accumulates_across_sessions() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:10"),
            Some("11:50"),
            Some("13:20"),
            Some("16:30"),
        ));

        assert_eq!(day.tardiness_minutes, 30);
        assert_eq!(day.undertime_minutes, 40);
    }

    #[test]
    fn test_seconds_are_truncated() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:00:59"),
            Some("12:00:00"),
            Some("13:01:30"),
            Some("17:00:00"),
        ));

        assert_eq!(day.tardiness_minutes, 1);
        assert_eq!(day.undertime_minutes, 0);
    }

    // ==========================================================================
    // Excuse short-circuit
    // ==========================================================================

    #[test]
    fn test_excuse_overrides_late_punches() {
        let punch = with_remark(
            make_punch(Some("10:00"), Some("11:00"), None, None),
            "Official Business (OB)",
        );
        let day = calculate_daily_attendance(&punch);

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);
        assert!(!day.is_incomplete);
        assert!(day.is_excused);
        assert_eq!(day.remark.as_deref(), Some("Official Business (OB)"));
    }

    #[test]
    fn test_excuse_overrides_empty_day() {
        let punch = with_remark(make_punch(None, None, None, None), "sick leave");
        let day = calculate_daily_attendance(&punch);

        assert!(!day.is_incomplete);
        assert!(day.is_excused);
        assert_eq!(day.undertime_minutes, 0);
    }

    #[test]
    fn test_absent_remark_is_excused_case_insensitively() {
        let punch = with_remark(make_punch(None, None, None, None), "ABSENT");
        assert!(calculate_daily_attendance(&punch).is_excused);
    }

    #[test]
    fn test_unrelated_remark_does_not_excuse() {
        let punch = with_remark(
            make_punch(Some("08:30"), Some("12:00"), Some("13:00"), Some("17:00")),
            "traffic",
        );
        let day = calculate_daily_attendance(&punch);

        assert!(!day.is_excused);
        assert_eq!(day.tardiness_minutes, 30);
    }

    // ==========================================================================
    // Missing sessions
    // ==========================================================================

    #[test]
    fn test_missed_morning_charges_full_session() {
        let day = calculate_daily_attendance(&make_punch(None, None, Some("13:00"), Some("17:00")));

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 240);
        assert!(!day.is_incomplete);
    }

    #[test]
    fn test_missed_afternoon_charges_full_session() {
        let day = calculate_daily_attendance(&make_punch(Some("08:05"), Some("12:00"), None, None));

        assert_eq!(day.tardiness_minutes, 5);
        assert_eq!(day.undertime_minutes, 240);
        assert!(!day.is_incomplete);
    }

    #[test]
    fn test_single_other_session_punch_triggers_full_charge() {
        // Afternoon has only an in-punch: afternoon is incomplete, morning is missed.
        let day = calculate_daily_attendance(&make_punch(None, None, Some("13:10"), None));

        assert_eq!(day.tardiness_minutes, 10);
        assert_eq!(day.undertime_minutes, 240);
        assert!(day.is_incomplete);
    }

    #[test]
    fn test_no_punches_is_incomplete_without_charges() {
        let day = calculate_daily_attendance(&make_punch(None, None, None, None));

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 0);
        assert!(day.is_incomplete);
    }

    #[test]
    fn test_unreadable_punches_count_as_missing() {
        let day = calculate_daily_attendance(&make_punch(
            Some("n/a"),
            Some(""),
            Some("13:00"),
            Some("17:00"),
        ));

        assert_eq!(day.undertime_minutes, 240);
        assert!(!day.is_incomplete);
        // Original strings are still echoed.
        assert_eq!(day.morning_in.as_deref(), Some("n/a"));
    }

    #[test]
    fn test_all_unreadable_is_incomplete() {
        let day = calculate_daily_attendance(&make_punch(Some("x"), Some("y"), Some("z"), None));

        assert!(day.is_incomplete);
        assert_eq!(day.total_minutes(), 0);
    }

    // ==========================================================================
    // Partial sessions
    // ==========================================================================

    #[test]
    fn test_missing_morning_out_still_charges_lateness() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:20"),
            None,
            Some("13:00"),
            Some("17:00"),
        ));

        assert_eq!(day.tardiness_minutes, 20);
        assert_eq!(day.undertime_minutes, 0);
        assert!(day.is_incomplete);
    }

    #[test]
    fn test_missing_afternoon_in_still_charges_early_out() {
        let day = calculate_daily_attendance(&make_punch(
            Some("08:00"),
            Some("12:00"),
            None,
            Some("16:00"),
        ));

        assert_eq!(day.tardiness_minutes, 0);
        assert_eq!(day.undertime_minutes, 60);
        assert!(day.is_incomplete);
    }

    #[test]
    fn test_incomplete_session_is_not_charged_as_missed() {
        // Morning has an out-punch only: it is incomplete, not a missed half-day.
        let day = calculate_daily_attendance(&make_punch(
            None,
            Some("12:00"),
            Some("13:00"),
            Some("17:00"),
        ));

        assert_eq!(day.undertime_minutes, 0);
        assert!(day.is_incomplete);
    }

    // ==========================================================================
    // Custom policy
    // ==========================================================================

    #[test]
    fn test_custom_policy_windows() {
        let policy = AttendancePolicy {
            morning: SessionWindow::from_hm(7, 30, 11, 30).unwrap(),
            afternoon: SessionWindow::from_hm(12, 30, 16, 30).unwrap(),
            excuse_keywords: vec!["Holiday".to_string()],
        };

        let day = calculate_daily_attendance_with_policy(
            &make_punch(Some("08:00"), Some("11:30"), None, None),
            &policy,
        );
        assert_eq!(day.tardiness_minutes, 30);
        assert_eq!(day.undertime_minutes, 240);

        let excused = with_remark(make_punch(None, None, None, None), "holiday");
        assert!(calculate_daily_attendance_with_policy(&excused, &policy).is_excused);

        let not_excused = with_remark(make_punch(None, None, None, None), "Leave");
        assert!(!calculate_daily_attendance_with_policy(&not_excused, &policy).is_excused);
    }
}
