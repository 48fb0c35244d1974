//! Response types for the HR engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PerformanceForm, TransitionRecord};

/// Response body for the `/reviews/transition` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// The form after the transition.
    pub form: PerformanceForm,
    /// The audit record of the transition.
    pub record: TransitionRecord,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    message,
                ),
            },
            EngineError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("The field '{}' failed validation", field),
                ),
            },
            EngineError::Unauthorized { required, .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "UNAUTHORIZED",
                    message,
                    format!(
                        "Required capability: {}",
                        required
                            .iter()
                            .map(|c| c.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ),
            },
            EngineError::InvalidTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("INVALID_TRANSITION", message),
            },
            EngineError::IncompleteRating { unrated_lines } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INCOMPLETE_DATA",
                    message,
                    format!("Unrated lines: {}", unrated_lines.join(", ")),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capability, FormStatus};

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_unauthorized_maps_to_403() {
        let api_error: ApiErrorResponse = EngineError::Unauthorized {
            actor_id: "emp_001".to_string(),
            operation: "finalize".to_string(),
            required: vec![Capability::Finalize],
        }
        .into();

        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
        assert_eq!(api_error.error.code, "UNAUTHORIZED");
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("Required capability: finalize")
        );
    }

    #[test]
    fn test_incomplete_rating_maps_to_422() {
        let api_error: ApiErrorResponse = EngineError::IncompleteRating {
            unrated_lines: vec!["l2".to_string()],
        }
        .into();

        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "INCOMPLETE_DATA");
    }

    #[test]
    fn test_invalid_transition_maps_to_409() {
        let api_error: ApiErrorResponse = EngineError::InvalidTransition {
            form_id: "ipcr_001".to_string(),
            status: FormStatus::Finalized,
            operation: "submit".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "INVALID_TRANSITION");
        assert_eq!(
            api_error.error.message,
            "Cannot submit form 'ipcr_001' while it is finalized"
        );
    }

    #[test]
    fn test_validation_and_config_statuses() {
        let validation: ApiErrorResponse = EngineError::validation("remark", "required").into();
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.error.code, "VALIDATION_ERROR");

        let config: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "roles.yaml".to_string(),
        }
        .into();
        assert_eq!(config.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.error.code, "CONFIG_ERROR");
    }
}
