//! Request types for the HR engine API.

use serde::{Deserialize, Serialize};

use crate::models::{DailyPunch, PerformanceForm, RatingLine, ReviewAction, Role};
use crate::review::BandingTable;

/// Request body for the `/attendance/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAttendanceRequest {
    /// The days to summarise, in the order they should be reported.
    pub punches: Vec<DailyPunch>,
}

/// The acting user as identified by the caller.
///
/// Capabilities are never accepted from the request; they are resolved
/// from `role` against the configured role table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRequest {
    /// The actor's employee identifier.
    pub id: String,
    /// The actor's organizational role.
    pub role: Role,
    /// The division the actor heads, if any.
    #[serde(default)]
    pub headed_division: Option<String>,
}

/// Request body for the `/reviews/transition` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Who is acting.
    pub actor: ActorRequest,
    /// The current form snapshot.
    pub form: PerformanceForm,
    /// The action to apply.
    pub action: ReviewAction,
    /// Remark for return or reopen.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Request body for the `/reviews/rating` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    /// The lines to aggregate.
    pub lines: Vec<RatingLine>,
    /// The banding table to apply.
    pub table: BandingTable,
}
