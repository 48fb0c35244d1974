//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_daily_attendance_with_policy, calculate_monthly_attendance_with_policy,
};
use crate::error::EngineError;
use crate::models::DailyPunch;
use crate::review::{apply_transition, compute_final_rating};

use super::request::{MonthlyAttendanceRequest, RatingRequest, TransitionRequest};
use super::response::{ApiError, ApiErrorResponse, TransitionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/daily", post(daily_attendance_handler))
        .route("/attendance/monthly", post(monthly_attendance_handler))
        .route("/reviews/transition", post(transition_handler))
        .route("/reviews/rating", post(rating_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected by engine"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /attendance/daily.
///
/// Accepts one day's punches and returns its tardiness and undertime.
async fn daily_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<DailyPunch>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily attendance request");

    let punch = match payload {
        Ok(Json(punch)) => punch,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = calculate_daily_attendance_with_policy(&punch, state.attendance_policy());
    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        date = %result.date,
        tardiness_minutes = result.tardiness_minutes,
        undertime_minutes = result.undertime_minutes,
        is_incomplete = result.is_incomplete,
        "Daily attendance calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /attendance/monthly.
///
/// Accepts a list of days and returns the per-day results with totals.
async fn monthly_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyAttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly attendance request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let summary =
        calculate_monthly_attendance_with_policy(&request.punches, state.attendance_policy());
    info!(
        correlation_id = %correlation_id,
        days = summary.days.len(),
        total_tardiness = summary.total_tardiness,
        total_undertime = summary.total_undertime,
        duration_us = start_time.elapsed().as_micros(),
        "Monthly attendance calculated"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /reviews/transition.
///
/// Resolves the actor against the role table, applies the action and
/// returns the new form snapshot with its audit record.
async fn transition_handler(
    State(state): State<AppState>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing review transition request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let actor = state.resolve_actor(request.actor);

    match apply_transition(
        &request.form,
        &actor,
        request.action,
        request.remark.as_deref(),
        Utc::now(),
    ) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                form_id = %outcome.form.id,
                action = %request.action,
                status = %outcome.form.status,
                "Review transition applied"
            );
            json_response(
                StatusCode::OK,
                TransitionResponse {
                    form: outcome.form,
                    record: outcome.record,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /reviews/rating.
///
/// Aggregates the given lines under the named banding table.
async fn rating_handler(payload: Result<Json<RatingRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rating request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compute_final_rating(&request.lines, request.table) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                lines_rated = outcome.lines_rated,
                final_rating = %outcome.final_rating,
                adjectival_rating = %outcome.adjectival_rating,
                "Rating computed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{DailyCalculation, FormStatus};
    use crate::review::RatingOutcome;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_daily_attendance_returns_200() {
        let body = r#"{
            "employee_id": "emp_001",
            "date": "2026-03-02",
            "morning_in": "08:15",
            "morning_out": "12:00",
            "afternoon_in": "13:00",
            "afternoon_out": "16:45"
        }"#;

        let response = post_json("/attendance/daily", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let result: DailyCalculation = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.tardiness_minutes, 15);
        assert_eq!(result.undertime_minutes, 15);
        assert!(!result.is_incomplete);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("/attendance/daily", "{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_date_returns_validation_error() {
        let response = post_json(
            "/attendance/daily",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("date"));
    }

    #[tokio::test]
    async fn test_transition_by_wrong_actor_returns_403() {
        let body = r#"{
            "actor": {"id": "emp_002", "role": "employee"},
            "form": {
                "id": "ipcr_001",
                "kind": "ipcr",
                "owner": {"type": "employee", "employee_id": "emp_001"},
                "cycle_id": "2026-H1",
                "status": "draft",
                "lines": [],
                "created_at": "2026-01-05T09:00:00Z",
                "updated_at": "2026-01-05T09:00:00Z"
            },
            "action": "submit"
        }"#;

        let response = post_json("/reviews/transition", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_transition_response_contains_record() {
        let body = r#"{
            "actor": {"id": "emp_050", "role": "supervisor"},
            "form": {
                "id": "ipcr_001",
                "kind": "ipcr",
                "owner": {"type": "employee", "employee_id": "emp_001"},
                "cycle_id": "2026-H1",
                "status": "submitted",
                "created_at": "2026-01-05T09:00:00Z",
                "updated_at": "2026-01-06T09:00:00Z"
            },
            "action": "return",
            "remark": "Please quantify targets"
        }"#;

        let response = post_json("/reviews/transition", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let result: TransitionResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.form.status, FormStatus::Returned);
        assert_eq!(result.record.from, FormStatus::Submitted);
        assert_eq!(result.record.actor_id, "emp_050");
        assert_eq!(
            result.form.return_remark.as_deref(),
            Some("Please quantify targets")
        );
    }

    #[tokio::test]
    async fn test_rating_endpoint() {
        let body = r#"{
            "table": "individual",
            "lines": [
                {"id": "l1", "category": "core_function", "output": "A", "success_indicator": "B",
                 "scores": {"quantity": 4, "quality": 5, "timeliness": 3}},
                {"id": "l2", "category": "core_function", "output": "C", "success_indicator": "D",
                 "scores": {"quantity": 5, "quality": 5, "timeliness": 5}}
            ]
        }"#;

        let response = post_json("/reviews/rating", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let outcome: RatingOutcome = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(outcome.final_rating, rust_decimal::Decimal::new(45, 1));
        assert_eq!(
            outcome.adjectival_rating,
            crate::models::AdjectivalRating::Outstanding
        );
    }

    #[tokio::test]
    async fn test_rating_with_unscored_line_returns_422() {
        let body = r#"{
            "table": "office",
            "lines": [
                {"id": "l1", "category": "core_function", "output": "A", "success_indicator": "B",
                 "scores": {"quantity": 4, "quality": null, "timeliness": 3}}
            ]
        }"#;

        let response = post_json("/reviews/rating", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INCOMPLETE_DATA");
    }
}
