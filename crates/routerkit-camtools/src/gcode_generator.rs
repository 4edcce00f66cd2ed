//! # G-code Generator
//!
//! The carving backend: a [`CutProcessor`] that turns each leaf of a cut
//! tree into router motion.
//!
//! - Paths are contoured in passes of at most `step_down`, reversing
//!   direction between passes when the path is open.
//! - Holes no wider than the bit tip are peck drilled; wider holes are
//!   milled as circles sized so the cutting edge traces the hole.
//! - Conic pockets are carved as descending concentric circles.
//!
//! Motion lines carry only the axis words whose formatted value changed.
//! Any error aborts generation; output produced up to that point must be
//! discarded by the caller.

use routerkit_core::geometry::vectors_are_equal;
use routerkit_core::{CutError, JobContext, Vector3D};
use routerkit_designer::interpreter::{process_cuts, CutProcessor, TraversalState};
use routerkit_designer::model::{Path, PathSegment};
use routerkit_designer::{circle_path, ConicPocket, Cut};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace};

use crate::conic_pocket::{radial_step, ConicPocketPlan};
use crate::error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
use crate::multipass::StepDownSchedule;
use crate::peck_drill::PeckCycle;

/// How comments are written into the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentMode {
    /// Comments are dropped
    None,
    /// `(comment)`
    #[default]
    Parentheses,
    /// `; comment`
    Semicolon,
}

/// Machine and formatting settings, lengths in native units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCodeOptions {
    /// Height for rapid travel between cuts
    pub safe_height: f64,
    /// Lowest height reached by rapid moves; plunges below it are fed
    pub minimum_fast_z: f64,
    /// Deepest single pass
    pub step_down: f64,
    pub feed_rate: f64,
    pub spindle_speed: f64,
    pub fraction_digits: usize,
    pub comment_mode: CommentMode,
}

impl Default for GCodeOptions {
    fn default() -> Self {
        Self {
            safe_height: 0.25,
            minimum_fast_z: 1.0 / 16.0,
            step_down: 0.02,
            feed_rate: 3.0,
            spindle_speed: 1000.0,
            fraction_digits: 4,
            comment_mode: CommentMode::Parentheses,
        }
    }
}

impl GCodeOptions {
    /// Validate the options
    pub fn validate(&self) -> ParameterResult<()> {
        for (name, value) in [
            ("step_down", self.step_down),
            ("feed_rate", self.feed_rate),
            ("spindle_speed", self.spindle_speed),
        ] {
            if value.is_nan() || value <= 0.0 || value.is_infinite() {
                return Err(ParameterError::NotPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if !self.safe_height.is_finite() || !self.minimum_fast_z.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "safe_height".to_string(),
                reason: "heights must be finite".to_string(),
            });
        }
        if self.minimum_fast_z > self.safe_height {
            return Err(ParameterError::InvalidValue {
                name: "minimum_fast_z".to_string(),
                reason: format!(
                    "{} is above the safe height {}",
                    self.minimum_fast_z, self.safe_height
                ),
            });
        }
        if self.fraction_digits > 10 {
            return Err(ParameterError::InvalidValue {
                name: "fraction_digits".to_string(),
                reason: format!("at most 10 digits are supported, got {}", self.fraction_digits),
            });
        }
        Ok(())
    }
}

/// Which way a path is being traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    fn sign(&self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    fn reversed(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// What the router is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    SafeHeight,
    Plunging,
    Cutting { direction: Direction, pass: usize },
    Retracting,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SafeHeight => write!(f, "at safe height"),
            Self::Plunging => write!(f, "plunging"),
            Self::Cutting { direction, pass } => write!(f, "cutting pass {pass} {direction:?}"),
            Self::Retracting => write!(f, "retracting"),
        }
    }
}

/// Carving backend emitting G-code text.
pub struct GCodeGenerator<'a> {
    job: &'a JobContext,
    options: GCodeOptions,
    output: String,
    position: Vector3D,
    last_words: [Option<String>; 3],
    state: MachineState,
    line_count: usize,
}

const AXES: [char; 3] = ['X', 'Y', 'Z'];

impl<'a> GCodeGenerator<'a> {
    /// Creates a new G-code generator.
    pub fn new(job: &'a JobContext, options: GCodeOptions) -> CamToolResult<Self> {
        options.validate()?;
        Ok(Self {
            job,
            options,
            output: String::new(),
            position: Vector3D::zeros(),
            last_words: [None, None, None],
            state: MachineState::SafeHeight,
            line_count: 0,
        })
    }

    pub fn options(&self) -> &GCodeOptions {
        &self.options
    }

    pub fn machine_state(&self) -> MachineState {
        self.state
    }

    /// Program text emitted so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Setup, every cut in order, then shutdown.
    pub fn generate(&mut self, cuts: &[Cut]) -> CamToolResult<()> {
        let job = self.job;
        self.emit_setup_code()?;
        process_cuts(self, job, cuts)?;
        self.emit_shutdown_code();
        info!(
            cuts = cuts.len(),
            lines = self.line_count,
            bit = %self.job.router_bit().name,
            "Generated G-code"
        );
        Ok(())
    }

    fn emit(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
        self.line_count += 1;
    }

    fn emit_blank_line(&mut self) {
        self.emit("");
    }

    pub fn emit_comment(&mut self, text: &str) {
        // Nested parentheses would end the comment early.
        let text = text.replace('(', "[").replace(')', "]");
        match self.options.comment_mode {
            CommentMode::None => {}
            CommentMode::Parentheses => self.emit(&format!("({text})")),
            CommentMode::Semicolon => self.emit(&format!("; {text}")),
        }
    }

    /// Fixed-point with the configured digits; never `-0.0000`.
    pub fn format_number(&self, value: f64) -> String {
        let s = format!("{:.*}", self.options.fraction_digits, value);
        match s.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
            _ => s,
        }
    }

    pub fn emit_setup_code(&mut self) -> CamToolResult<()> {
        let system = self.job.measurement_system()?;
        self.emit("G90");
        self.emit(system.gcode_word());
        self.emit(&format!("F{}", self.options.feed_rate));
        self.emit(&format!("S{}", self.options.spindle_speed));
        self.emit("M03");
        self.zoom_to_safe_height();
        self.emit_blank_line();
        Ok(())
    }

    pub fn emit_shutdown_code(&mut self) {
        self.emit_blank_line();
        self.emit_comment("Job done!");
        self.zoom_to_safe_height();
        self.emit("M05");
    }

    fn set_state(&mut self, state: MachineState) {
        if self.state != state {
            trace!(from = %self.state, to = %state, "Machine state");
            self.state = state;
        }
    }

    /// Straight move; only changed axes are written. Nothing is written when
    /// no axis changes.
    fn do_move(&mut self, command: &str, target: [Option<f64>; 3]) {
        let mut line = command.to_string();
        for axis in 0..3 {
            let Some(value) = target[axis] else {
                continue;
            };
            let word = self.format_number(value);
            if self.last_words[axis].as_deref() != Some(word.as_str()) {
                line.push_str(&format!(" {}{}", AXES[axis], word));
                self.last_words[axis] = Some(word);
            }
            self.position[axis] = value;
        }
        if line.len() > command.len() {
            self.emit(&line);
        }
    }

    fn g00(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.do_move("G00", [x, y, z]);
    }

    fn g01(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.do_move("G01", [x, y, z]);
    }

    /// Arc in the XY plane from the current position, center words relative
    /// to the start.
    fn do_arc(&mut self, counter_clockwise: bool, end: &Vector3D, center: &Vector3D) {
        let i = center.x - self.position.x;
        let j = center.y - self.position.y;
        let x = self.format_number(end.x);
        let y = self.format_number(end.y);
        let line = format!(
            "{} X{} Y{} I{} J{}",
            if counter_clockwise { "G03" } else { "G02" },
            x,
            y,
            self.format_number(i),
            self.format_number(j)
        );
        self.emit(&line);
        self.position.x = end.x;
        self.position.y = end.y;
        self.last_words[0] = Some(x);
        self.last_words[1] = Some(y);
    }

    fn zoom_to_safe_height(&mut self) {
        self.set_state(MachineState::Retracting);
        self.g00(None, None, Some(self.options.safe_height));
        self.set_state(MachineState::SafeHeight);
    }

    /// Rapid to above `position`, rapid down to the minimum fast height,
    /// then feed the rest of the way.
    fn zoom_to(&mut self, position: &Vector3D) {
        self.zoom_to_safe_height();
        self.g00(Some(position.x), Some(position.y), None);
        self.set_state(MachineState::Plunging);
        let fast_z = self.options.minimum_fast_z.max(position.z);
        self.g00(None, None, Some(fast_z));
        if fast_z != position.z {
            self.g01(None, None, Some(position.z));
        }
    }

    fn vertex(path: &Path, segment: usize, vertex: usize) -> Result<Vector3D, CutError> {
        path.vertices
            .get(vertex)
            .copied()
            .ok_or(CutError::MissingVertex { segment, vertex })
    }

    fn carve_path_segment(
        &mut self,
        state: &TraversalState<'_>,
        path: &Path,
        index: usize,
        direction: Direction,
    ) -> CamToolResult<()> {
        let segment = path.segments[index];
        let end = match direction {
            Direction::Forward => segment.end(),
            Direction::Reverse => segment.start(),
        };
        let end = state.place(&Self::vertex(path, index, end)?);
        match segment {
            PathSegment::Straight { .. } => self.g01(Some(end.x), Some(end.y), None),
            PathSegment::Arc { axis, sense, .. } => {
                let center = path
                    .vertices
                    .get(axis)
                    .ok_or(CutError::MissingArcAxis {
                        segment: index,
                        axis,
                    })?;
                let center = state.place(center);
                let mirror = if state.transform().is_mirroring() { -1 } else { 1 };
                let turn = sense.sign() * direction.sign() * mirror;
                self.do_arc(turn > 0, &end, &center);
            }
        }
        Ok(())
    }

    /// Contours `path` from the surface down to the state's target depth.
    fn carve_path(&mut self, state: &TraversalState<'_>, path: &Path) -> CamToolResult<()> {
        let Some(start_local) = path.start_point() else {
            return Ok(());
        };
        let start = state.place(&start_local);
        let target_z = state.target_z(&start_local);
        let passes = StepDownSchedule::new(start.z, target_z, self.options.step_down).pass_depths();
        if passes.is_empty() {
            debug!("Path has no depth below the surface; skipping");
            return Ok(());
        }

        debug!(
            segments = path.segments.len(),
            passes = passes.len(),
            target_z,
            "Carving path"
        );
        self.zoom_to(&start);
        let mut direction = Direction::Forward;
        for (pass, z) in passes.into_iter().enumerate() {
            self.set_state(MachineState::Plunging);
            self.emit_comment(&format!("Step down to {}", self.format_number(z)));
            self.g01(None, None, Some(z));
            self.set_state(MachineState::Cutting { direction, pass });

            let before = self.position;
            let count = path.segments.len();
            for step in 0..count {
                let index = match direction {
                    Direction::Forward => step,
                    Direction::Reverse => count - 1 - step,
                };
                self.carve_path_segment(state, path, index, direction)?;
            }
            if !vectors_are_equal(&self.position, &before) {
                trace!(pass, "Path is open; reversing for the next pass");
                direction = direction.reversed();
            }
        }
        self.zoom_to_safe_height();
        Ok(())
    }

    fn peck_hole(&mut self, state: &TraversalState<'_>) {
        let center = state.place(&Vector3D::zeros());
        let target_z = state.target_z(&Vector3D::zeros());
        if center.z <= target_z {
            debug!(z = center.z, target_z, "Hole has no depth in the stock; skipping");
            return;
        }
        self.zoom_to(&center);
        for stroke in PeckCycle::new(center.z, target_z, self.options.step_down).strokes() {
            self.g01(None, None, Some(stroke.plunge_z));
            if let Some(retract_z) = stroke.retract_z {
                self.g01(None, None, Some(retract_z));
            }
        }
        self.zoom_to_safe_height();
    }
}

impl CutProcessor for GCodeGenerator<'_> {
    type Error = CamToolError;

    fn process_path(&mut self, state: &TraversalState<'_>, path: &Path) -> CamToolResult<()> {
        self.carve_path(state, path)
    }

    fn process_circle(&mut self, state: &TraversalState<'_>, diameter: f64) -> CamToolResult<()> {
        let tip = self.job.router_bit().tip_diameter();
        let native_diameter = state.native_length(diameter);
        let label = format!(
            "{}{}",
            self.format_number(native_diameter),
            self.job.native_unit().abbreviation
        );
        if native_diameter - tip <= 0.0 {
            debug!(diameter = native_diameter, tip, "Peck drilling hole");
            self.emit_comment(&format!("{label} hole will be pecked"));
            self.peck_hole(state);
            Ok(())
        } else {
            debug!(diameter = native_diameter, tip, "Milling hole");
            self.emit_comment(&format!("{label} hole will be circles"));
            let radius = (native_diameter - tip) / 2.0 / state.transform().length_scale();
            self.carve_path(state, &circle_path(radius))
        }
    }

    fn process_conic_pocket(
        &mut self,
        state: &TraversalState<'_>,
        pocket: &ConicPocket,
    ) -> CamToolResult<()> {
        if pocket.cuts_bottom {
            return Err(CutError::UnsupportedFeature {
                feature: "conic pocket with cutsBottom (flat bottom clearing)".to_string(),
            }
            .into());
        }
        let center = state.place(&Vector3D::zeros());
        let max_depth = center.z - self.job.min_z();
        if max_depth <= 0.0 {
            debug!(z = center.z, "Pocket is below the stock; skipping");
            return Ok(());
        }
        let plan = ConicPocketPlan::new(
            state.native_length(pocket.diameter) / 2.0,
            state.native_length(pocket.bottom_diameter) / 2.0,
            state.native_depth(pocket.edge_depth).min(max_depth),
            state.native_depth(pocket.bottom_depth).min(max_depth),
            radial_step(self.job.router_bit().tip_diameter()),
        )?;
        let rings = plan.rings();
        debug!(rings = rings.len(), step = plan.radial_step, "Carving conic pocket");

        for (index, ring) in rings.iter().enumerate() {
            let z = state.clamp_z(center.z - ring.depth);
            let start = Vector3D::new(center.x, center.y - ring.radius, z);
            if index == 0 {
                self.zoom_to(&start);
            } else {
                self.set_state(MachineState::Plunging);
                self.g01(Some(start.x), Some(start.y), None);
                self.g01(None, None, Some(z));
            }
            self.set_state(MachineState::Cutting {
                direction: Direction::Forward,
                pass: index,
            });
            self.do_arc(true, &start, &center);
        }
        self.zoom_to_safe_height();
        Ok(())
    }

    fn process_pause(&mut self, _state: &TraversalState<'_>) -> CamToolResult<()> {
        self.emit("M00");
        Ok(())
    }

    fn process_comment(&mut self, _state: &TraversalState<'_>, comment: &str) -> CamToolResult<()> {
        self.emit_comment(comment);
        Ok(())
    }
}

/// Generates a complete program for `cuts`.
pub fn generate_gcode(job: &JobContext, options: GCodeOptions, cuts: &[Cut]) -> CamToolResult<String> {
    let mut generator = GCodeGenerator::new(job, options)?;
    generator.generate(cuts)?;
    Ok(generator.finish())
}
