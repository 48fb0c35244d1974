//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, Role};

use super::types::{AttendancePolicy, EngineConfig, RoleCapabilities};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── attendance.yaml   # Session windows and excuse keywords
/// └── roles.yaml        # Role -> capability table
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
/// use hr_engine::models::Role;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let actor = loader.resolve_actor("emp_100", Role::Supervisor, None);
/// println!("Capabilities: {:?}", actor.capabilities);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or inconsistent values (`ConfigParseError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hr_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), hr_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance_path = path.join("attendance.yaml");
        let attendance = Self::load_yaml::<AttendancePolicy>(&attendance_path)?;
        attendance
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: attendance_path.display().to_string(),
                message,
            })?;

        let roles_path = path.join("roles.yaml");
        let roles = Self::load_yaml::<RoleCapabilities>(&roles_path)?;
        roles
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: roles_path.display().to_string(),
                message,
            })?;

        tracing::debug!(
            path = %path.display(),
            roles = roles.roles.len(),
            excuse_keywords = attendance.excuse_keywords.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(attendance, roles),
        })
    }

    /// Creates a loader holding the built-in defaults, without touching disk.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the attendance policy.
    pub fn attendance(&self) -> &AttendancePolicy {
        self.config.attendance()
    }

    /// Returns the role capability table.
    pub fn roles(&self) -> &RoleCapabilities {
        self.config.roles()
    }

    /// Resolves an actor against the configured role table.
    pub fn resolve_actor(
        &self,
        id: impl Into<String>,
        role: Role,
        headed_division: Option<String>,
    ) -> Actor {
        Actor::resolve(id, role, headed_division, self.roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Capability;
    use tempfile::TempDir;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn write_default_roles(dir: &Path) {
        fs::copy(
            Path::new(config_path()).join("roles.yaml"),
            dir.join("roles.yaml"),
        )
        .unwrap();
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.attendance(), &AttendancePolicy::default());
        assert_eq!(loader.roles(), &RoleCapabilities::default());
    }

    #[test]
    fn test_resolve_actor_uses_role_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let head = loader.resolve_actor("emp_100", Role::OfficeHead, None);
        assert!(head.capabilities.contains(Capability::Review));
        assert!(head.capabilities.contains(Capability::Finalize));

        let employee = loader.resolve_actor("emp_001", Role::Employee, None);
        assert!(employee.capabilities.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("attendance.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        fs::write(dir.join("attendance.yaml"), "morning: [not, a, window").unwrap();
        write_default_roles(dir);

        match ConfigLoader::load(dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("attendance.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_session_returns_parse_error() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        fs::write(
            dir.join("attendance.yaml"),
            "morning:\n  start: \"12:00\"\n  end: \"08:00\"\nafternoon:\n  start: \"13:00\"\n  end: \"17:00\"\nexcuse_keywords: [Leave]\n",
        )
        .unwrap();
        write_default_roles(dir);

        match ConfigLoader::load(dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("morning"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_role_granting_own_returns_parse_error() {
        let scratch = scratch_dir();
        let dir = scratch.path();
        fs::copy(
            Path::new(config_path()).join("attendance.yaml"),
            dir.join("attendance.yaml"),
        )
        .unwrap();
        fs::write(dir.join("roles.yaml"), "roles:\n  employee: [own]\n").unwrap();

        match ConfigLoader::load(dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("roles.yaml"));
                assert!(message.contains("own"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_scratch_config_is_removed_after_use() {
        let scratch = scratch_dir();
        let dir = scratch.path().to_path_buf();
        write_default_roles(&dir);
        assert!(dir.join("roles.yaml").exists());

        drop(scratch);
        assert!(!dir.exists());
    }

    #[test]
    fn test_with_defaults_needs_no_files() {
        let loader = ConfigLoader::with_defaults();
        assert_eq!(loader.attendance().morning.start_minute(), 480);
    }
}
