//! Error handling for RouterKit
//!
//! Provides error types for every layer of G-code generation:
//! - Unit errors (unit lookup, numeric literal parsing, rational arithmetic)
//! - Cut errors (unsupported features, malformed paths, traversal limits)
//!
//! All error types use `thiserror` for ergonomic error handling. Every error
//! is fatal: generation stops and any output produced so far must be discarded.

use thiserror::Error;

/// Unit error type
///
/// Raised while resolving unit names, parsing numbers and amounts,
/// or doing exact rational arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// No unit with this name or alias exists in the unit table
    #[error("No such distance unit as '{name}'")]
    UnknownUnit {
        /// The name that failed to resolve.
        name: String,
    },

    /// A numeric literal could not be parsed
    #[error("Failed to parse '{input}' as number")]
    MalformedNumber {
        /// The offending literal.
        input: String,
    },

    /// An amount string was not `<number><unit>`
    #[error("Invalid amount string: '{input}'")]
    MalformedAmount {
        /// The offending amount string.
        input: String,
    },

    /// A rational number was built or divided with a zero denominator
    #[error("Division by zero in rational number")]
    DivisionByZero,

    /// A rational operation exceeded the 64-bit numerator/denominator range
    #[error("Rational number overflow")]
    Overflow,
}

/// Cut error type
///
/// Raised while traversing a Cut tree or generating toolpaths from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutError {
    /// The cut requests a feature that is not implemented
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// Description of the feature.
        feature: String,
    },

    /// An arc segment references an axis vertex that does not exist
    #[error("Undefined curve center vertex {axis} on path segment {segment}")]
    MissingArcAxis {
        /// Index of the offending segment.
        segment: usize,
        /// The axis vertex index it referenced.
        axis: usize,
    },

    /// A segment references a start or end vertex that does not exist
    #[error("Vertex {vertex} referenced by path segment {segment} does not exist")]
    MissingVertex {
        /// Index of the offending segment.
        segment: usize,
        /// The vertex index it referenced.
        vertex: usize,
    },

    /// Compound nesting exceeded the traversal limit
    #[error("Cut tree nesting exceeds limit of {limit}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },

    /// The job's native unit has no G-code unit mode
    #[error("Native unit '{unit}' is neither inch nor millimeter")]
    UnsupportedNativeUnit {
        /// The native unit's name.
        unit: String,
    },

    /// A parameter value is invalid
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Main error type for RouterKit
#[derive(Error, Debug)]
pub enum Error {
    /// Unit error
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Cut error
    #[error(transparent)]
    Cut(#[from] CutError),
}

impl Error {
    /// Check if this is a unit error
    pub fn is_unit_error(&self) -> bool {
        matches!(self, Error::Unit(_))
    }

    /// Check if this is a cut error
    pub fn is_cut_error(&self) -> bool {
        matches!(self, Error::Cut(_))
    }
}

/// Result type for RouterKit operations
pub type Result<T> = std::result::Result<T, Error>;
