//! Core data models for the HR engine.
//!
//! This module contains the plain records exchanged with the portal:
//! time-clock punches and their derived attendance results, performance
//! forms with their rating lines, and the actor/capability types the review
//! workflow authorizes against.

mod actor;
mod attendance_result;
mod performance_form;
mod punch;
mod rating_line;
mod transition;

pub use actor::{Actor, Capability, CapabilitySet, Role};
pub use attendance_result::{DailyCalculation, MonthlySummary};
pub use performance_form::{AdjectivalRating, FormKind, FormOwner, FormStatus, PerformanceForm};
pub use punch::DailyPunch;
pub use rating_line::{LineCategory, LineContent, MAX_SCORE, MIN_SCORE, RatingLine, SubScores};
pub use transition::{ReviewAction, TransitionRecord};
