//! RouterKit Settings Crate
//!
//! Loads and validates job configuration files and turns them into a
//! [`routerkit_core::JobContext`] plus [`routerkit_camtools::GCodeOptions`].

pub mod config;
pub mod error;

pub use config::{BitKind, BitSettings, GCodeSettings, JobConfig, JobSettings};
pub use error::{SettingsError, SettingsResult};
