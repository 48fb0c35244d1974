//! Review workflow actions and transition records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FormStatus;

/// A status-changing action on a performance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Owner hands the draft in.
    Submit,
    /// Division-level review of an individual form.
    Review,
    /// Send the form back to its owner.
    Return,
    /// Close an individual form with its final rating.
    Finalize,
    /// Close an office-level form with its final rating.
    Approve,
    /// Owner takes a returned form back into draft.
    Revise,
    /// Finalizer reopens a closed form; requires a remark.
    Reopen,
}

impl ReviewAction {
    /// Returns true for actions that pass judgement on the form, which its
    /// owner may never take.
    pub fn rates_form(self) -> bool {
        matches!(
            self,
            ReviewAction::Review
                | ReviewAction::Return
                | ReviewAction::Finalize
                | ReviewAction::Approve
        )
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReviewAction::Submit => "submit",
            ReviewAction::Review => "review",
            ReviewAction::Return => "return",
            ReviewAction::Finalize => "finalize",
            ReviewAction::Approve => "approve",
            ReviewAction::Revise => "revise",
            ReviewAction::Reopen => "reopen",
        };
        f.write_str(name)
    }
}

/// A record of one applied transition, for the external audit log.
///
/// # Example
///
/// ```
/// use hr_engine::models::{FormStatus, ReviewAction, TransitionRecord};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let record = TransitionRecord {
///     id: Uuid::new_v4(),
///     form_id: "ipcr_001".to_string(),
///     action: ReviewAction::Submit,
///     from: FormStatus::Draft,
///     to: FormStatus::Submitted,
///     actor_id: "emp_001".to_string(),
///     remark: None,
///     at: Utc::now(),
/// };
/// assert_eq!(record.to, FormStatus::Submitted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The form that moved.
    pub form_id: String,
    /// The applied action.
    pub action: ReviewAction,
    /// Status before the action.
    pub from: FormStatus,
    /// Status after the action.
    pub to: FormStatus,
    /// The acting user.
    pub actor_id: String,
    /// Remark supplied with the action, if any.
    pub remark: Option<String>,
    /// When the action was applied.
    pub at: DateTime<Utc>,
}
