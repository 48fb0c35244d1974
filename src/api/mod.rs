//! HTTP API module for the HR engine.
//!
//! This module exposes the attendance calculator and the review workflow
//! as JSON endpoints. It is a thin boundary: persistence, sessions and
//! audit storage stay with the host application.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ActorRequest, MonthlyAttendanceRequest, RatingRequest, TransitionRequest};
pub use response::{ApiError, TransitionResponse};
pub use state::AppState;
