//! Performance commitment and review form models.
//!
//! This module defines [`PerformanceForm`] and its status, kind and owner
//! types. IPCR forms belong to an employee; DPCR and OPCR forms belong to a
//! division or office and follow a shorter approval path.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::review::BandingTable;

use super::RatingLine;

/// The kind of performance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Individual Performance Commitment and Review.
    Ipcr,
    /// Division Performance Commitment and Review.
    Dpcr,
    /// Office Performance Commitment and Review.
    Opcr,
}

impl FormKind {
    /// Returns true for the office-level kinds (DPCR and OPCR).
    pub fn is_office_level(self) -> bool {
        matches!(self, FormKind::Dpcr | FormKind::Opcr)
    }

    /// The adjectival banding table that applies to this kind of form.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::FormKind;
    /// use hr_engine::review::BandingTable;
    ///
    /// assert_eq!(FormKind::Ipcr.banding_table(), BandingTable::Individual);
    /// assert_eq!(FormKind::Opcr.banding_table(), BandingTable::Office);
    /// ```
    pub fn banding_table(self) -> BandingTable {
        if self.is_office_level() {
            BandingTable::Office
        } else {
            BandingTable::Individual
        }
    }
}

/// Lifecycle status of a performance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Being prepared by its owner.
    Draft,
    /// Handed in for review.
    Submitted,
    /// Reviewed at division level (individual forms only).
    Reviewed,
    /// Rated and closed (individual forms).
    Finalized,
    /// Sent back to the owner for changes.
    Returned,
    /// Approved and closed (office-level forms).
    Approved,
}

impl FormStatus {
    /// Returns true while the owner may edit line content.
    pub fn is_editable(self) -> bool {
        matches!(self, FormStatus::Draft | FormStatus::Returned)
    }

    /// Returns true once the form is closed and its content frozen.
    pub fn is_terminal(self) -> bool {
        matches!(self, FormStatus::Finalized | FormStatus::Approved)
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormStatus::Draft => "draft",
            FormStatus::Submitted => "submitted",
            FormStatus::Reviewed => "reviewed",
            FormStatus::Finalized => "finalized",
            FormStatus::Returned => "returned",
            FormStatus::Approved => "approved",
        };
        f.write_str(name)
    }
}

/// The employee or division a form belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormOwner {
    /// An individual employee (IPCR).
    Employee {
        /// The employee identifier.
        employee_id: String,
    },
    /// A division or office (DPCR/OPCR).
    Division {
        /// The division identifier.
        division_id: String,
    },
}

/// Categorical label derived from a numeric rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AdjectivalRating {
    /// Lowest band.
    #[serde(rename = "Poor")]
    Poor,
    /// Second-lowest band.
    #[serde(rename = "Unsatisfactory")]
    Unsatisfactory,
    /// Middle band.
    #[serde(rename = "Satisfactory")]
    Satisfactory,
    /// Second-highest band.
    #[serde(rename = "Very Satisfactory")]
    VerySatisfactory,
    /// Highest band.
    #[serde(rename = "Outstanding")]
    Outstanding,
}

impl AdjectivalRating {
    /// The whole-number equivalent on the 1-5 scale.
    pub fn numeric_equivalent(self) -> u8 {
        match self {
            AdjectivalRating::Poor => 1,
            AdjectivalRating::Unsatisfactory => 2,
            AdjectivalRating::Satisfactory => 3,
            AdjectivalRating::VerySatisfactory => 4,
            AdjectivalRating::Outstanding => 5,
        }
    }
}

impl fmt::Display for AdjectivalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdjectivalRating::Poor => "Poor",
            AdjectivalRating::Unsatisfactory => "Unsatisfactory",
            AdjectivalRating::Satisfactory => "Satisfactory",
            AdjectivalRating::VerySatisfactory => "Very Satisfactory",
            AdjectivalRating::Outstanding => "Outstanding",
        };
        f.write_str(label)
    }
}

/// A performance commitment and review form snapshot.
///
/// The engine only ever receives and returns snapshots; committing a new
/// snapshot atomically against the stored one is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceForm {
    /// Identifier of the form.
    pub id: String,
    /// IPCR, DPCR or OPCR.
    pub kind: FormKind,
    /// Owning employee or division.
    pub owner: FormOwner,
    /// Rating-period reference, e.g. "2026-H1".
    pub cycle_id: String,
    /// Current lifecycle status.
    pub status: FormStatus,
    /// Commitment items.
    #[serde(default)]
    pub lines: Vec<RatingLine>,
    /// Unweighted mean of the line averages, set on finalize/approve.
    #[serde(default)]
    pub final_rating: Option<Decimal>,
    /// Band of `final_rating`, set together with it.
    #[serde(default)]
    pub adjectival_rating: Option<AdjectivalRating>,
    /// Remark attached by the last return or reopen.
    #[serde(default)]
    pub return_remark: Option<String>,
    /// Actor who reviewed the form.
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// Actor who finalized or approved the form.
    #[serde(default)]
    pub finalized_by: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Time of the last submission.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Time of review.
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Time of finalization or approval.
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl PerformanceForm {
    /// Creates an empty draft form.
    pub fn new(
        id: impl Into<String>,
        kind: FormKind,
        owner: FormOwner,
        cycle_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            owner,
            cycle_id: cycle_id.into(),
            status: FormStatus::Draft,
            lines: Vec::new(),
            final_rating: None,
            adjectival_rating: None,
            return_remark: None,
            reviewed_by: None,
            finalized_by: None,
            created_at,
            updated_at: created_at,
            submitted_at: None,
            reviewed_at: None,
            finalized_at: None,
        }
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: &str) -> Option<&RatingLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Looks up a line by id for mutation.
    pub fn line_mut(&mut self, line_id: &str) -> Option<&mut RatingLine> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }

    /// Clears the computed rating and the reviewer/finalizer stamps.
    pub(crate) fn clear_rating(&mut self) {
        self.final_rating = None;
        self.adjectival_rating = None;
        self.reviewed_by = None;
        self.reviewed_at = None;
        self.finalized_by = None;
        self.finalized_at = None;
    }
}
