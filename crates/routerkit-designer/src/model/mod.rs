//! Geometry authored by part designers.

pub mod path;

pub use path::{Path, PathSegment, RotationSense};
