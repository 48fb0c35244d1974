//! Time-clock punch model.
//!
//! This module defines the [`DailyPunch`] struct, the raw twice-daily
//! time-clock record that the attendance calculator consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee's time-clock record for one calendar date.
///
/// The four punch values are kept as the raw strings captured by the time
/// clock or transcribed by hand. They are parsed leniently by the calculator:
/// anything that is not `HH:MM` or `HH:MM:SS` is treated as a missing punch.
///
/// # Example
///
/// ```
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
/// assert_eq!(punch.afternoon_out.as_deref(), Some("16:45"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPunch {
    /// Identifier of the employee the punches belong to.
    pub employee_id: String,
    /// The calendar date of the punches.
    pub date: NaiveDate,
    /// Morning arrival.
    #[serde(default)]
    pub morning_in: Option<String>,
    /// Morning departure (lunch out).
    #[serde(default)]
    pub morning_out: Option<String>,
    /// Afternoon arrival (lunch in).
    #[serde(default)]
    pub afternoon_in: Option<String>,
    /// Afternoon departure.
    #[serde(default)]
    pub afternoon_out: Option<String>,
    /// Free-text remark, e.g. "Sick Leave" or "OB - Regional Office".
    #[serde(default)]
    pub remark: Option<String>,
}

impl DailyPunch {
    /// Creates a punch record with no times and no remark.
    pub fn empty(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            morning_in: None,
            morning_out: None,
            afternoon_in: None,
            afternoon_out: None,
            remark: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_punch_has_no_times() {
        let punch = DailyPunch::empty("emp_001", make_date("2026-03-02"));

        assert!(punch.morning_in.is_none());
        assert!(punch.afternoon_out.is_none());
        assert!(punch.remark.is_none());
    }

    #[test]
    fn test_punch_deserialization_defaults_missing_fields() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2026-03-02",
            "morning_in": "08:00"
        }"#;

        let punch: DailyPunch = serde_json::from_str(json).unwrap();
        assert_eq!(punch.morning_in.as_deref(), Some("08:00"));
        assert!(punch.morning_out.is_none());
        assert!(punch.remark.is_none());
    }
}
