//! HR Portal Engine
//!
//! This crate provides the two computational cores of a civil-service HR
//! portal: the attendance time-accounting engine, which turns twice-daily
//! time-clock punches into tardiness and undertime minutes, and the
//! performance-review workflow, which moves IPCR/DPCR/OPCR forms through
//! their capability-checked lifecycle and computes final adjectival ratings.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod review;
