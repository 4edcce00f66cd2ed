//! # RouterKit CAM Tools
//!
//! Turns a cut tree into G-code for a three-axis router.
//!
//! ## Toolpath Strategies
//!
//! - **Multipass**: step-down schedules for contouring paths
//! - **Peck Drill**: plunge/retract strokes for holes no wider than the bit tip
//! - **Conic Pocket**: concentric rings approximating a cone
//!
//! The [`GCodeGenerator`] backend combines them.

pub mod conic_pocket;
pub mod error;
pub mod gcode_generator;
pub mod multipass;
pub mod peck_drill;

pub use conic_pocket::{radial_step, ConicPocketPlan, ConicRing};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use gcode_generator::{
    generate_gcode, CommentMode, Direction, GCodeGenerator, GCodeOptions, MachineState,
};
pub use multipass::StepDownSchedule;
pub use peck_drill::{PeckCycle, PeckStroke};
