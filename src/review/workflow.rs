//! Review workflow state machine.
//!
//! [`check_transition`] is the pure legality predicate: it tells the caller
//! whether an action is allowed on a form snapshot, by this actor, with this
//! data, and what status it would lead to. [`apply_transition`] computes the
//! next snapshot. Neither touches storage; the caller commits the returned
//! snapshot atomically against the one it read.
//!
//! Every check runs in the same order:
//!
//! 1. Authorization against the transition table
//! 2. State legality
//! 3. Action guards (submit completeness, rating completeness, reopen remark)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Actor, Capability, FormStatus, PerformanceForm, ReviewAction, TransitionRecord,
};

use super::rating::{RatingOutcome, compute_final_rating};
use super::transitions::{actions_from, find_rule, required_capabilities};

/// A new form snapshot together with the audit record of the move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// The form after the transition.
    pub form: PerformanceForm,
    /// The record to hand to the audit log.
    pub record: TransitionRecord,
}

/// Checks that `actor` holds at least one of `required` for `form`.
///
/// An empty `required` authorizes everyone; the caller then fails on state.
pub(crate) fn authorize(
    form: &PerformanceForm,
    actor: &Actor,
    operation: &str,
    required: &[Capability],
) -> EngineResult<()> {
    if required.is_empty() || actor.capabilities_for(form).contains_any(required) {
        return Ok(());
    }

    debug!(
        form_id = %form.id,
        actor_id = %actor.id,
        operation,
        "Rejected: actor lacks capability"
    );
    Err(EngineError::Unauthorized {
        actor_id: actor.id.clone(),
        operation: operation.to_string(),
        required: required.to_vec(),
    })
}

/// Rejects the form's owner for an operation that rates the form.
///
/// Capabilities come from the actor's role, so an office head holds
/// Review and Finalize over their own form too; ownership takes precedence.
pub(crate) fn forbid_self_rating(
    form: &PerformanceForm,
    actor: &Actor,
    operation: &str,
    required: &[Capability],
) -> EngineResult<()> {
    if !actor.owns(form) {
        return Ok(());
    }

    debug!(
        form_id = %form.id,
        actor_id = %actor.id,
        operation,
        "Rejected: owner may not rate own form"
    );
    Err(EngineError::Unauthorized {
        actor_id: actor.id.clone(),
        operation: operation.to_string(),
        required: required.to_vec(),
    })
}

/// Trims a remark, treating blank text as absent.
fn normalize_remark(remark: Option<&str>) -> Option<String> {
    remark
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Runs the full check and returns the target status plus, for closing
/// actions, the computed rating.
fn evaluate(
    form: &PerformanceForm,
    actor: &Actor,
    action: ReviewAction,
    remark: Option<&str>,
) -> EngineResult<(FormStatus, Option<RatingOutcome>)> {
    let operation = action.to_string();
    let required = required_capabilities(form.kind, form.status, action);
    authorize(form, actor, &operation, &required)?;
    if action.rates_form() && !required.is_empty() {
        forbid_self_rating(form, actor, &operation, &required)?;
    }

    let Some(rule) = find_rule(form.kind, form.status, action) else {
        debug!(
            form_id = %form.id,
            status = %form.status,
            operation = %operation,
            "Rejected: no transition from current status"
        );
        return Err(EngineError::InvalidTransition {
            form_id: form.id.clone(),
            status: form.status,
            operation,
        });
    };

    let rating = match action {
        ReviewAction::Submit => {
            check_submittable(form)?;
            None
        }
        ReviewAction::Finalize | ReviewAction::Approve => {
            Some(compute_final_rating(&form.lines, form.kind.banding_table())?)
        }
        ReviewAction::Reopen => {
            if normalize_remark(remark).is_none() {
                return Err(EngineError::validation(
                    "remark",
                    "a remark is required to reopen a closed form",
                ));
            }
            None
        }
        ReviewAction::Review | ReviewAction::Return | ReviewAction::Revise => None,
    };

    Ok((rule.to, rating))
}

fn check_submittable(form: &PerformanceForm) -> EngineResult<()> {
    if form.lines.is_empty() {
        return Err(EngineError::validation("lines", "form has no rating lines"));
    }
    if let Some(line) = form
        .lines
        .iter()
        .find(|l| l.success_indicator.trim().is_empty())
    {
        return Err(EngineError::validation(
            format!("lines[{}].success_indicator", line.id),
            "success indicator must not be empty",
        ));
    }
    Ok(())
}

/// Checks whether `actor` may apply `action` to `form`, returning the status
/// the form would move to.
///
/// # Errors
///
/// - `Unauthorized` if the actor lacks the capability the action needs, or
///   owns the form and the action rates it (review, return, finalize,
///   approve).
/// - `InvalidTransition` if the action is not legal from the current status.
/// - `Validation` if a guard fails (no lines or an empty success indicator
///   on submit, a score outside 1-5 on finalize/approve, no remark on reopen).
/// - `IncompleteRating` if finalize/approve is attempted with unscored lines.
///
/// # Examples
///
/// ```
/// use hr_engine::config::RoleCapabilities;
/// use hr_engine::error::EngineError;
/// use hr_engine::models::{
///     Actor, FormKind, FormOwner, FormStatus, LineCategory, LineContent, PerformanceForm,
///     RatingLine, ReviewAction, Role,
/// };
/// use hr_engine::review::check_transition;
/// use chrono::Utc;
///
/// let roles = RoleCapabilities::default();
/// let owner = Actor::resolve("emp_001", Role::Employee, None, &roles);
/// let colleague = Actor::resolve("emp_002", Role::Employee, None, &roles);
///
/// let mut form = PerformanceForm::new(
///     "ipcr_001",
///     FormKind::Ipcr,
///     FormOwner::Employee { employee_id: "emp_001".to_string() },
///     "2026-H1",
///     Utc::now(),
/// );
/// form.lines.push(RatingLine::new("l1", LineContent {
///     category: LineCategory::CoreFunction,
///     output: "Payroll".to_string(),
///     success_indicator: "Released every 15th and 30th".to_string(),
///     accomplishment: String::new(),
/// }));
///
/// assert_eq!(
///     check_transition(&form, &owner, ReviewAction::Submit, None).unwrap(),
///     FormStatus::Submitted
/// );
/// assert!(matches!(
///     check_transition(&form, &colleague, ReviewAction::Submit, None),
///     Err(EngineError::Unauthorized { .. })
/// ));
/// ```
pub fn check_transition(
    form: &PerformanceForm,
    actor: &Actor,
    action: ReviewAction,
    remark: Option<&str>,
) -> EngineResult<FormStatus> {
    evaluate(form, actor, action, remark).map(|(to, _)| to)
}

/// Applies `action` to a copy of `form`.
///
/// The input snapshot is never modified, so a rejected action leaves the
/// caller's form exactly as it was.
///
/// Side effects on the returned snapshot:
///
/// - Submit stamps `submitted_at` and clears a stale return remark.
/// - Review stamps `reviewed_by` and `reviewed_at`.
/// - Return clears any rating and stores the remark.
/// - Finalize and Approve set `final_rating` and `adjectival_rating` using the
///   form kind's banding table and stamp `finalized_by` and `finalized_at`.
/// - Revise clears any rating.
/// - Reopen clears any rating and stores the remark.
///
/// # Errors
///
/// Same as [`check_transition`].
pub fn apply_transition(
    form: &PerformanceForm,
    actor: &Actor,
    action: ReviewAction,
    remark: Option<&str>,
    at: DateTime<Utc>,
) -> EngineResult<TransitionOutcome> {
    let (to, rating) = evaluate(form, actor, action, remark)?;
    let remark = normalize_remark(remark);
    let from = form.status;

    let mut next = form.clone();
    match action {
        ReviewAction::Submit => {
            next.submitted_at = Some(at);
            next.return_remark = None;
        }
        ReviewAction::Review => {
            next.reviewed_by = Some(actor.id.clone());
            next.reviewed_at = Some(at);
        }
        ReviewAction::Return => {
            next.clear_rating();
            next.return_remark = remark.clone();
        }
        ReviewAction::Finalize | ReviewAction::Approve => {
            if let Some(outcome) = rating {
                next.final_rating = Some(outcome.final_rating);
                next.adjectival_rating = Some(outcome.adjectival_rating);
            }
            next.finalized_by = Some(actor.id.clone());
            next.finalized_at = Some(at);
        }
        ReviewAction::Revise => {
            next.clear_rating();
        }
        ReviewAction::Reopen => {
            next.clear_rating();
            next.return_remark = remark.clone();
        }
    }
    next.status = to;
    next.updated_at = at;

    info!(
        form_id = %form.id,
        from = %from,
        to = %to,
        actor_id = %actor.id,
        closed = to.is_terminal(),
        "Transition applied"
    );

    let record = TransitionRecord {
        id: Uuid::new_v4(),
        form_id: form.id.clone(),
        action,
        from,
        to,
        actor_id: actor.id.clone(),
        remark,
        at,
    };

    Ok(TransitionOutcome { form: next, record })
}

/// Actions the actor holds the capability for from the form's current status.
///
/// Rating actions are never offered to the form's owner. Guards are not
/// evaluated, so a listed action may still fail on data.
pub fn available_actions(form: &PerformanceForm, actor: &Actor) -> Vec<ReviewAction> {
    let capabilities = actor.capabilities_for(form);
    let owner = actor.owns(form);
    actions_from(form.kind, form.status)
        .into_iter()
        .filter(|action| !(owner && action.rates_form()))
        .filter(|action| {
            find_rule(form.kind, form.status, *action)
                .is_some_and(|rule| capabilities.contains_any(rule.requires))
        })
        .collect()
}
