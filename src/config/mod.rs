//! Configuration loading and management for the HR engine.
//!
//! This module loads the attendance policy and the role capability table
//! from YAML files. Both have built-in defaults matching the civil-service
//! rules, so loading from disk is optional.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Morning session starts at {}", config.attendance().morning.start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub(crate) use types::minute_of_day;
pub use types::{AttendancePolicy, EngineConfig, RoleCapabilities, SessionWindow};
