//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type has a
//! `Default` carrying the built-in civil-service rules, so the engines work
//! without any configuration on disk.

use std::collections::HashMap;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::{Capability, CapabilitySet, Role};

/// An official work session, e.g. 08:00-12:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Official session start.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Official session end.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl SessionWindow {
    /// Creates a window from whole hours and minutes.
    ///
    /// Returns `None` if either time is not a valid time of day.
    pub fn from_hm(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start_hour, start_min, 0)?,
            end: NaiveTime::from_hms_opt(end_hour, end_min, 0)?,
        })
    }

    /// Session start as minutes since midnight.
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    /// Session end as minutes since midnight.
    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end)
    }

    /// Session length in minutes; zero if the window is inverted.
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute().saturating_sub(self.start_minute())
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).expect("constant time of day is valid")
}

/// Minutes since midnight, ignoring seconds.
pub(crate) fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Rules for converting punches to tardiness and undertime.
///
/// # Example
///
/// ```
/// use hr_engine::config::AttendancePolicy;
///
/// let policy = AttendancePolicy::default();
/// assert_eq!(policy.morning.duration_minutes(), 240);
/// assert_eq!(policy.afternoon.duration_minutes(), 240);
/// assert!(policy.is_excused("Sick leave"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Morning session.
    pub morning: SessionWindow,
    /// Afternoon session.
    pub afternoon: SessionWindow,
    /// Remark substrings (case-insensitive) that excuse a whole day.
    pub excuse_keywords: Vec<String>,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            morning: SessionWindow {
                start: hm(8, 0),
                end: hm(12, 0),
            },
            afternoon: SessionWindow {
                start: hm(13, 0),
                end: hm(17, 0),
            },
            excuse_keywords: vec!["Leave".to_string(), "OB".to_string(), "Absent".to_string()],
        }
    }
}

impl AttendancePolicy {
    /// Returns true if the remark contains any excuse keyword, ignoring case.
    ///
    /// Matching is a plain substring test, so "OB" also matches inside
    /// longer words such as "job".
    pub fn is_excused(&self, remark: &str) -> bool {
        let remark = remark.to_lowercase();
        self.excuse_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| remark.contains(&k.to_lowercase()))
    }

    /// Checks that both windows are non-empty and do not overlap.
    pub fn validate(&self) -> Result<(), String> {
        for (name, window) in [("morning", &self.morning), ("afternoon", &self.afternoon)] {
            if window.end <= window.start {
                return Err(format!("{} session must end after it starts", name));
            }
        }
        if self.afternoon.start < self.morning.end {
            return Err("afternoon session must start after the morning session ends".to_string());
        }
        if self.excuse_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("excuse keywords must not be blank".to_string());
        }
        Ok(())
    }
}

/// The role to capability table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapabilities {
    /// Capabilities granted to each role. Roles absent from the map get none.
    pub roles: HashMap<Role, CapabilitySet>,
}

impl Default for RoleCapabilities {
    fn default() -> Self {
        let roles = HashMap::from([
            (Role::Employee, CapabilitySet::new()),
            (Role::Supervisor, CapabilitySet::from_iter([Capability::Review])),
            (
                Role::OfficeHead,
                CapabilitySet::from_iter([Capability::Review, Capability::Finalize]),
            ),
            (
                Role::HrManager,
                CapabilitySet::from_iter([Capability::Finalize, Capability::ManageOfficeForms]),
            ),
            (
                Role::Administrator,
                CapabilitySet::from_iter([
                    Capability::Review,
                    Capability::Finalize,
                    Capability::ManageOfficeForms,
                ]),
            ),
        ]);
        Self { roles }
    }
}

impl RoleCapabilities {
    /// Capabilities granted to `role`.
    pub fn capabilities_for(&self, role: Role) -> CapabilitySet {
        self.roles.get(&role).cloned().unwrap_or_default()
    }

    /// Rejects tables that grant ownership through a role.
    pub fn validate(&self) -> Result<(), String> {
        let mut offenders: Vec<String> = self
            .roles
            .iter()
            .filter(|(_, caps)| caps.contains(Capability::Own))
            .map(|(role, _)| format!("{:?}", role))
            .collect();
        if offenders.is_empty() {
            return Ok(());
        }
        offenders.sort();
        Err(format!(
            "capability 'own' is derived from form ownership and cannot be granted to roles: {}",
            offenders.join(", ")
        ))
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attendance rules.
    attendance: AttendancePolicy,
    /// Role capability table.
    roles: RoleCapabilities,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(attendance: AttendancePolicy, roles: RoleCapabilities) -> Self {
        Self { attendance, roles }
    }

    /// Returns the attendance policy.
    pub fn attendance(&self) -> &AttendancePolicy {
        &self.attendance
    }

    /// Returns the role capability table.
    pub fn roles(&self) -> &RoleCapabilities {
        &self.roles
    }
}

/// Serde adapter for `HH:MM` times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}
