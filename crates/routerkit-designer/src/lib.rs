//! # RouterKit Designer
//!
//! Machining intent as data. This crate provides the path model and
//! [`PathBuilder`], path primitives, the [`Cut`] tree, and the traversal
//! contract ([`CutProcessor`] and [`process_cut`]) that every backend
//! implements.
//!
//! ## Architecture
//!
//! ```text
//! Part generators ──▶ Cut tree ──▶ process_cut ──▶ CutProcessor
//!                                                   ├── GCodeGenerator (camtools)
//!                                                   └── BoundsFinder
//! ```

pub mod arrays;
pub mod bounds;
pub mod cut;
pub mod interpreter;
pub mod model;
pub mod path_builder;
pub mod serialization;
pub mod shapes;

pub use arrays::{rectangular_array, rectangular_array_points, RectangularArrayParams};
pub use bounds::{Bounds, BoundsFinder};
pub use cut::{
    Compound, ConicPocket, Cut, MatrixTransform, Pause, RoundHole, SimpleTransform, SpaceSide,
    TracePath, Transformish,
};
pub use interpreter::{process_cut, process_cuts, CutProcessor, TraversalState, MAX_NESTING_DEPTH};
pub use model::{Path, PathSegment, RotationSense};
pub use path_builder::{CornerStyle, PathBuilder, EIGHTH_TURN, FULL_TURN, QUARTER_TURN};
pub use serialization::CutFile;
pub use shapes::{box_path, circle_path, BoxOptions, CornerOptions};
