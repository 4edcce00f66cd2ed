//! Error types for the settings crate.
//!
//! This module provides structured error types for job configuration
//! loading, saving and validation.

use routerkit_camtools::ParameterError;
use routerkit_core::UnitError;
use std::io;
use thiserror::Error;

/// Errors that can occur while handling a job configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The job does not say how thick the stock is.
    #[error("Workpiece thickness is required")]
    MissingThickness,

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Config file must be .json or .toml, got '{0}'")]
    UnsupportedFormat(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// An amount could not be decoded.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// The job context could not be built.
    #[error(transparent)]
    Core(#[from] routerkit_core::Error),

    /// The resulting G-code options are out of range.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
