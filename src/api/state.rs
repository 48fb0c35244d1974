//! Application state for the HR engine API.

use std::sync::Arc;

use crate::config::{AttendancePolicy, ConfigLoader};
use crate::models::Actor;

use super::request::ActorRequest;

/// Shared, read-only application state.
///
/// Holds the attendance policy and role table every handler works against.
/// Cloning shares the same loaded configuration.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates application state from the built-in civil-service policy and
    /// role table.
    pub fn with_defaults() -> Self {
        Self::new(ConfigLoader::with_defaults())
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The attendance policy for attendance endpoints.
    pub fn attendance_policy(&self) -> &AttendancePolicy {
        self.config.attendance()
    }

    /// Resolves a request's actor against the role table.
    ///
    /// Capabilities always come from the configured table, never the request.
    pub fn resolve_actor(&self, actor: ActorRequest) -> Actor {
        self.config
            .resolve_actor(actor.id, actor.role, actor.headed_division)
    }
}
