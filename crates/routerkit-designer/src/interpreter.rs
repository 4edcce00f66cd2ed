//! # Cut Tree Interpreter
//!
//! Walks a cut tree, accumulating placement, active unit and depth, and hands
//! each leaf to a backend through the [`CutProcessor`] hooks. Backends
//! (G-code generation, bounds reporting) differ only in what they do with the
//! leaves.
//!
//! Traversal context lives in [`TraversalState`], a value passed down the
//! recursion. Children get modified copies, so a parent's context is
//! restored on every return path, including errors.

use routerkit_core::{CutError, JobContext, Rational, Transform, UnitError, Vector3D};
use tracing::{debug, trace, warn};

use crate::cut::{ConicPocket, Cut, SpaceSide};
use crate::model::Path;

/// Deepest allowed Compound nesting.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Context in effect at one node of the tree.
#[derive(Debug, Clone)]
pub struct TraversalState<'a> {
    job: &'a JobContext,
    transform: Transform,
    unit_scale: Rational,
    depth_offset: f64,
    through: bool,
    nesting: usize,
}

impl<'a> TraversalState<'a> {
    /// State at the root: native units, no placement, at the stock surface.
    pub fn new(job: &'a JobContext) -> Self {
        Self {
            job,
            transform: Transform::identity(),
            unit_scale: Rational::ONE,
            depth_offset: 0.0,
            through: false,
            nesting: 0,
        }
    }

    /// Root state with an initial placement, e.g. a job offset.
    pub fn with_transform(job: &'a JobContext, transform: Transform) -> Self {
        Self {
            transform,
            ..Self::new(job)
        }
    }

    pub fn job(&self) -> &'a JobContext {
        self.job
    }

    /// Local-to-machine placement, in native units.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Native units per local unit.
    pub fn unit_scale(&self) -> Rational {
        self.unit_scale
    }

    /// Whether the enclosing cut goes through the stock.
    pub fn is_through(&self) -> bool {
        self.through
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    /// Machine position of a local point at the surface the cut starts from.
    pub fn place(&self, local: &Vector3D) -> Vector3D {
        self.transform.apply_point(local)
    }

    /// Machine length of a local length measured in the XY plane.
    pub fn native_length(&self, local: f64) -> f64 {
        local * self.transform.length_scale()
    }

    /// Machine depth of a local depth.
    pub fn native_depth(&self, local: f64) -> f64 {
        local * self.transform.depth_scale()
    }

    /// Bottom of the cut at `local`, never below the stock's bottom face.
    pub fn target_z(&self, local: &Vector3D) -> f64 {
        let min_z = self.job.min_z();
        if self.through {
            return min_z;
        }
        (self.place(local).z + self.depth_offset).max(min_z)
    }

    /// Clamps a machine Z to the stock's bottom face.
    pub fn clamp_z(&self, z: f64) -> f64 {
        z.max(self.job.min_z())
    }

    fn descend(&self, transform: Transform) -> Result<Self, CutError> {
        let nesting = self.nesting + 1;
        if nesting > MAX_NESTING_DEPTH {
            return Err(CutError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(Self {
            transform,
            nesting,
            ..self.clone()
        })
    }

    fn rebased(&self, unit_value: Rational) -> Result<Self, UnitError> {
        let ratio = unit_value.checked_div(self.unit_scale)?;
        Ok(Self {
            transform: self.transform * Transform::scale(ratio.to_f64()),
            unit_scale: unit_value,
            ..self.clone()
        })
    }

    /// Cut `depth` local units below the current surface.
    fn sunk(&self, depth: f64) -> Self {
        let mut state = self.clone();
        if depth.is_infinite() && depth > 0.0 {
            state.through = true;
        } else if depth != 0.0 {
            state.depth_offset -= self.native_depth(depth);
        }
        state
    }
}

/// Backend hooks invoked for each leaf of a cut tree.
pub trait CutProcessor {
    type Error: From<CutError> + From<UnitError>;

    /// Carve or otherwise consume `path` at the state's depth.
    fn process_path(&mut self, state: &TraversalState<'_>, path: &Path) -> Result<(), Self::Error>;

    /// A round hole of local `diameter` centered on the local origin.
    fn process_circle(&mut self, state: &TraversalState<'_>, diameter: f64) -> Result<(), Self::Error>;

    fn process_conic_pocket(
        &mut self,
        state: &TraversalState<'_>,
        pocket: &ConicPocket,
    ) -> Result<(), Self::Error>;

    fn process_pause(&mut self, state: &TraversalState<'_>) -> Result<(), Self::Error>;

    /// Called with a node's comment before the node itself is processed.
    fn process_comment(&mut self, _state: &TraversalState<'_>, _comment: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Processes `cut` and all its descendants under `state`.
pub fn process_cut<P>(processor: &mut P, state: &TraversalState<'_>, cut: &Cut) -> Result<(), P::Error>
where
    P: CutProcessor + ?Sized,
{
    debug!(kind = cut.kind(), nesting = state.nesting(), "Processing cut");
    if let Some(comment) = cut.comment() {
        processor.process_comment(state, comment)?;
    }

    match cut {
        Cut::Compound(compound) => {
            let base = match &compound.unit {
                Some(unit) => {
                    let value = state.job().decode_exact(unit)?;
                    trace!(unit = %unit, scale = %value, "Rebasing units");
                    state.rebased(value)?
                }
                None => state.clone(),
            };
            for transformish in &compound.transforms {
                let child = base.descend(base.transform() * &transformish.to_transform())?;
                for component in &compound.components {
                    process_cut(processor, &child, component)?;
                }
            }
            Ok(())
        }
        Cut::TracePath(trace_path) => {
            trace_path.path.validate()?;
            if trace_path.space_side != SpaceSide::Middle {
                warn!(
                    space_side = ?trace_path.space_side,
                    "Bit radius compensation is not applied; carving the nominal path"
                );
            }
            processor.process_path(&state.sunk(trace_path.depth), &trace_path.path)
        }
        Cut::RoundHole(hole) => processor.process_circle(&state.sunk(hole.depth), hole.diameter),
        Cut::ConicPocket(pocket) => processor.process_conic_pocket(state, pocket),
        Cut::Pause(_) => processor.process_pause(state),
    }
}

/// Processes every cut in order under a fresh root state.
pub fn process_cuts<P>(processor: &mut P, job: &JobContext, cuts: &[Cut]) -> Result<(), P::Error>
where
    P: CutProcessor + ?Sized,
{
    let state = TraversalState::new(job);
    for cut in cuts {
        process_cut(processor, &state, cut)?;
    }
    Ok(())
}
