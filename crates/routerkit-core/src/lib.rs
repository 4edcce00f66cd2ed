//! # RouterKit Core
//!
//! Core types for RouterKit.
//! Provides exact rational arithmetic, distance units and multi-unit amounts,
//! the geometry kernel, router bit models and the per-job context that every
//! toolpath backend reads from.

pub mod context;
pub mod data;
pub mod error;
pub mod geometry;
pub mod rational;
pub mod units;

pub use context::JobContext;
pub use data::{BitProfile, RouterBit};
pub use error::{CutError, Error, Result, UnitError};
pub use geometry::{Transform, Vector3D};
pub use rational::Rational;
pub use units::{ComplexAmount, MeasurementSystem, Unit, UnitTable, INCH, MILLIMETER};
