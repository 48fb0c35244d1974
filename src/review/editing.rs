//! Form creation and line editing.
//!
//! Like the transitions, every operation here takes a snapshot and returns
//! a new one; the input is never modified. Owners edit line content only
//! while the form is editable (draft or returned). Raters record scores only
//! while the form is with them.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Actor, Capability, FormKind, FormOwner, FormStatus, LineContent, PerformanceForm,
    RatingLine, SubScores,
};

use super::workflow::{authorize, forbid_self_rating};

const OWNER: &[Capability] = &[Capability::Own];
const RATER: &[Capability] = &[Capability::Review, Capability::Finalize];
const FINALIZER: &[Capability] = &[Capability::Finalize];

fn frozen(form: &PerformanceForm, operation: &str) -> EngineError {
    debug!(
        form_id = %form.id,
        status = %form.status,
        operation,
        "Rejected: form not editable in current status"
    );
    EngineError::InvalidTransition {
        form_id: form.id.clone(),
        status: form.status,
        operation: operation.to_string(),
    }
}

fn check_content_editable(
    form: &PerformanceForm,
    actor: &Actor,
    operation: &str,
) -> EngineResult<()> {
    authorize(form, actor, operation, OWNER)?;
    if !form.status.is_editable() {
        return Err(frozen(form, operation));
    }
    Ok(())
}

fn unknown_line(line_id: &str) -> EngineError {
    EngineError::validation("line_id", format!("no line '{}' on this form", line_id))
}

/// Creates a new draft form.
///
/// An IPCR must be owned by an employee and created by that employee. A
/// DPCR or OPCR must be owned by a division and created by the head of that
/// division or by an actor holding the office-form management capability.
///
/// # Errors
///
/// - `Validation` if the owner does not match the form kind, or an id is blank.
/// - `Unauthorized` if the actor may not create this form.
///
/// # Examples
///
/// ```
/// use hr_engine::config::RoleCapabilities;
/// use hr_engine::models::{Actor, FormKind, FormOwner, FormStatus, Role};
/// use hr_engine::review::create_form;
/// use chrono::Utc;
///
/// let hr = Actor::resolve("emp_090", Role::HrManager, None, &RoleCapabilities::default());
/// let form = create_form(
///     "dpcr_2026_finance",
///     FormKind::Dpcr,
///     FormOwner::Division { division_id: "div_finance".to_string() },
///     "2026",
///     &hr,
///     Utc::now(),
/// )
/// .unwrap();
/// assert_eq!(form.status, FormStatus::Draft);
/// ```
pub fn create_form(
    id: impl Into<String>,
    kind: FormKind,
    owner: FormOwner,
    cycle_id: impl Into<String>,
    actor: &Actor,
    at: DateTime<Utc>,
) -> EngineResult<PerformanceForm> {
    let id = id.into();
    let cycle_id = cycle_id.into();
    if id.trim().is_empty() {
        return Err(EngineError::validation("id", "form id must not be empty"));
    }
    if cycle_id.trim().is_empty() {
        return Err(EngineError::validation("cycle_id", "cycle id must not be empty"));
    }

    let required: &[Capability] = match (&owner, kind.is_office_level()) {
        (FormOwner::Employee { .. }, false) => OWNER,
        (FormOwner::Division { .. }, true) => &[Capability::Own, Capability::ManageOfficeForms],
        (FormOwner::Employee { .. }, true) => {
            return Err(EngineError::validation(
                "owner",
                "office-level forms must be owned by a division",
            ));
        }
        (FormOwner::Division { .. }, false) => {
            return Err(EngineError::validation(
                "owner",
                "individual forms must be owned by an employee",
            ));
        }
    };

    let form = PerformanceForm::new(id, kind, owner, cycle_id, at);
    authorize(&form, actor, "create form", required)?;
    Ok(form)
}

/// Appends a new unscored line to an editable form.
///
/// # Errors
///
/// - `Unauthorized` unless the actor owns the form.
/// - `InvalidTransition` unless the form is draft or returned.
/// - `Validation` if `line_id` is blank or already used on the form.
pub fn add_line(
    form: &PerformanceForm,
    actor: &Actor,
    line_id: impl Into<String>,
    content: LineContent,
    at: DateTime<Utc>,
) -> EngineResult<PerformanceForm> {
    check_content_editable(form, actor, "add line")?;

    let line_id = line_id.into();
    if line_id.trim().is_empty() {
        return Err(EngineError::validation("line_id", "line id must not be empty"));
    }
    if form.line(&line_id).is_some() {
        return Err(EngineError::validation(
            "line_id",
            format!("line '{}' already exists on this form", line_id),
        ));
    }

    let mut next = form.clone();
    next.lines.push(RatingLine::new(line_id, content));
    next.updated_at = at;
    Ok(next)
}

/// Replaces the owner-editable content of a line, keeping its scores.
///
/// # Errors
///
/// Same as [`add_line`], with `Validation` for an unknown `line_id`.
pub fn update_line_content(
    form: &PerformanceForm,
    actor: &Actor,
    line_id: &str,
    content: LineContent,
    at: DateTime<Utc>,
) -> EngineResult<PerformanceForm> {
    check_content_editable(form, actor, "edit line")?;

    let mut next = form.clone();
    let line = next.line_mut(line_id).ok_or_else(|| unknown_line(line_id))?;
    line.apply_content(content);
    next.updated_at = at;
    Ok(next)
}

/// Removes a line from an editable form.
///
/// # Errors
///
/// Same as [`update_line_content`].
pub fn remove_line(
    form: &PerformanceForm,
    actor: &Actor,
    line_id: &str,
    at: DateTime<Utc>,
) -> EngineResult<PerformanceForm> {
    check_content_editable(form, actor, "remove line")?;

    let mut next = form.clone();
    let before = next.lines.len();
    next.lines.retain(|l| l.id != line_id);
    if next.lines.len() == before {
        return Err(unknown_line(line_id));
    }
    next.updated_at = at;
    Ok(next)
}

/// Records a rater's sub-scores and remarks on one line.
///
/// Individual forms accept scores while submitted (from a reviewer or
/// finalizer) or reviewed (from a finalizer only); office-level forms while
/// submitted. Missing scores are allowed here and only block finalization.
///
/// # Errors
///
/// - `Unauthorized` unless the actor can review or finalize, or the form is
///   reviewed and the actor cannot finalize, or the actor owns the form.
/// - `InvalidTransition` if the form is not with its raters.
/// - `Validation` for a score outside 1-5 or an unknown `line_id`.
pub fn record_scores(
    form: &PerformanceForm,
    actor: &Actor,
    line_id: &str,
    scores: SubScores,
    remarks: Option<String>,
    at: DateTime<Utc>,
) -> EngineResult<PerformanceForm> {
    let operation = "record scores";
    let required = match form.status {
        FormStatus::Reviewed => FINALIZER,
        _ => RATER,
    };
    authorize(form, actor, operation, required)?;
    forbid_self_rating(form, actor, operation, required)?;

    let scoreable = match form.status {
        FormStatus::Submitted => true,
        FormStatus::Reviewed => !form.kind.is_office_level(),
        _ => false,
    };
    if !scoreable {
        return Err(frozen(form, operation));
    }

    if let Some((name, score)) = scores.out_of_range() {
        return Err(EngineError::validation(
            format!("scores.{}", name),
            format!("score {} is outside 1-5", score),
        ));
    }

    let mut next = form.clone();
    let line = next.line_mut(line_id).ok_or_else(|| unknown_line(line_id))?;
    line.scores = scores;
    line.remarks = remarks.filter(|r| !r.trim().is_empty());
    next.updated_at = at;
    Ok(next)
}
