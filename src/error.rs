//! Error types for the HR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the attendance and review engines can report.
//! Expected business conditions are always returned as values; attendance
//! time parsing never produces an error at all.

use thiserror::Error;

use crate::models::{Capability, FormStatus};

/// The main error type for the HR engine.
///
/// The four review-workflow variants (`Validation`, `Unauthorized`,
/// `InvalidTransition`, `IncompleteRating`) are deliberately distinct so the
/// boundary layer can render different messages and HTTP statuses.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or contained inconsistent values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required field was missing or malformed.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The actor does not hold a capability that permits the operation.
    #[error("Actor '{actor_id}' is not permitted to {operation}: requires {}", format_capabilities(.required))]
    Unauthorized {
        /// The identifier of the rejected actor.
        actor_id: String,
        /// The attempted operation.
        operation: String,
        /// Capabilities of which the actor needed at least one.
        required: Vec<Capability>,
    },

    /// The operation is not legal from the form's current status.
    #[error("Cannot {operation} form '{form_id}' while it is {status}")]
    InvalidTransition {
        /// The form the operation targeted.
        form_id: String,
        /// The status the form was in.
        status: FormStatus,
        /// The attempted operation.
        operation: String,
    },

    /// Aggregation was attempted while some rating lines lack sub-scores.
    #[error("Not all lines rated: {} line(s) missing sub-scores ({})", .unrated_lines.len(), .unrated_lines.join(", "))]
    IncompleteRating {
        /// Identifiers of the lines with at least one missing sub-score.
        unrated_lines: Vec<String>,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_capabilities(required: &[Capability]) -> String {
    required
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
