//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for toolpath carving and
//! parameter validation.

use routerkit_core::{CutError, UnitError};
use thiserror::Error;

/// Errors that can occur during toolpath generation.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The cut tree could not be carved.
    #[error(transparent)]
    Cut(#[from] CutError),

    /// A measurement could not be resolved.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter must be strictly positive.
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: String, value: f64 },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
