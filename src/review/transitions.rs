//! The review workflow transition table.
//!
//! Each row is one legal status move: which kind of form it applies to, the
//! source status, the action, the target status, and the capabilities of
//! which the actor needs at least one.

use crate::models::{Capability, FormKind, FormStatus, ReviewAction};

/// Which kinds of form a transition row applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormScope {
    /// IPCR only.
    Individual,
    /// DPCR and OPCR only.
    OfficeLevel,
    /// Every kind.
    Any,
}

impl FormScope {
    fn includes(self, kind: FormKind) -> bool {
        match self {
            FormScope::Individual => !kind.is_office_level(),
            FormScope::OfficeLevel => kind.is_office_level(),
            FormScope::Any => true,
        }
    }
}

/// One legal status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// Kinds of form the row applies to.
    pub scope: FormScope,
    /// Source status.
    pub from: FormStatus,
    /// The action.
    pub action: ReviewAction,
    /// Target status.
    pub to: FormStatus,
    /// Any one of these capabilities authorizes the move.
    pub requires: &'static [Capability],
}

const OWNER: &[Capability] = &[Capability::Own];
const REVIEWER_OR_FINALIZER: &[Capability] = &[Capability::Review, Capability::Finalize];
const FINALIZER: &[Capability] = &[Capability::Finalize];

/// Every legal transition.
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        scope: FormScope::Any,
        from: FormStatus::Draft,
        action: ReviewAction::Submit,
        to: FormStatus::Submitted,
        requires: OWNER,
    },
    TransitionRule {
        scope: FormScope::Individual,
        from: FormStatus::Submitted,
        action: ReviewAction::Review,
        to: FormStatus::Reviewed,
        requires: REVIEWER_OR_FINALIZER,
    },
    TransitionRule {
        scope: FormScope::Any,
        from: FormStatus::Submitted,
        action: ReviewAction::Return,
        to: FormStatus::Returned,
        requires: REVIEWER_OR_FINALIZER,
    },
    TransitionRule {
        scope: FormScope::Individual,
        from: FormStatus::Reviewed,
        action: ReviewAction::Finalize,
        to: FormStatus::Finalized,
        requires: FINALIZER,
    },
    TransitionRule {
        scope: FormScope::Individual,
        from: FormStatus::Reviewed,
        action: ReviewAction::Return,
        to: FormStatus::Returned,
        requires: FINALIZER,
    },
    TransitionRule {
        scope: FormScope::OfficeLevel,
        from: FormStatus::Submitted,
        action: ReviewAction::Approve,
        to: FormStatus::Approved,
        requires: FINALIZER,
    },
    TransitionRule {
        scope: FormScope::Any,
        from: FormStatus::Returned,
        action: ReviewAction::Revise,
        to: FormStatus::Draft,
        requires: OWNER,
    },
    TransitionRule {
        scope: FormScope::Individual,
        from: FormStatus::Finalized,
        action: ReviewAction::Reopen,
        to: FormStatus::Draft,
        requires: FINALIZER,
    },
    TransitionRule {
        scope: FormScope::OfficeLevel,
        from: FormStatus::Approved,
        action: ReviewAction::Reopen,
        to: FormStatus::Draft,
        requires: FINALIZER,
    },
];

/// Finds the row for `action` from `from` on a form of `kind`.
pub fn find_rule(
    kind: FormKind,
    from: FormStatus,
    action: ReviewAction,
) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|r| r.scope.includes(kind) && r.from == from && r.action == action)
}

/// The capabilities that could authorize `action` on a form of `kind` in `from`.
///
/// When `action` is legal from `from`, this is that row's requirement.
/// Otherwise it is the union over every row for `action` on this kind of
/// form, so an unauthorized actor is told so before being told the state is
/// wrong. Empty if the action never applies to this kind of form.
pub fn required_capabilities(
    kind: FormKind,
    from: FormStatus,
    action: ReviewAction,
) -> Vec<Capability> {
    if let Some(rule) = find_rule(kind, from, action) {
        return rule.requires.to_vec();
    }

    let mut required: Vec<Capability> = TRANSITIONS
        .iter()
        .filter(|r| r.scope.includes(kind) && r.action == action)
        .flat_map(|r| r.requires.iter().copied())
        .collect();
    required.sort();
    required.dedup();
    required
}

/// Actions with a row leaving `from` for a form of `kind`.
pub fn actions_from(kind: FormKind, from: FormStatus) -> Vec<ReviewAction> {
    TRANSITIONS
        .iter()
        .filter(|r| r.scope.includes(kind) && r.from == from)
        .map(|r| r.action)
        .collect()
}
