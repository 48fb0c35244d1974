//! Performance-review workflow for the HR engine.
//!
//! This module contains the IPCR/DPCR/OPCR form lifecycle: the declarative
//! transition table, the capability-checked state machine, owner and rater
//! editing operations, form-level rating aggregation, and the two adjectival
//! banding tables.

mod banding;
mod editing;
mod rating;
mod transitions;
mod workflow;

pub use banding::BandingTable;
pub use editing::{add_line, create_form, record_scores, remove_line, update_line_content};
pub use rating::{RatingOutcome, compute_final_rating, validate_scores};
pub use transitions::{
    FormScope, TRANSITIONS, TransitionRule, actions_from, find_rule, required_capabilities,
};
pub use workflow::{TransitionOutcome, apply_transition, available_actions, check_transition};
