//! Step-down schedules for deep cuts.
//!
//! A cut deeper than one step is taken in passes, each at most `step_down`
//! below the previous one, the last landing exactly on the target.

/// Passes closer than this to the target are merged into the final pass.
const DEPTH_TOLERANCE: f64 = 1e-9;

/// Depth plan for a multi-pass cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDownSchedule {
    pub surface_z: f64,
    pub target_z: f64,
    pub step_down: f64,
}

impl StepDownSchedule {
    pub fn new(surface_z: f64, target_z: f64, step_down: f64) -> Self {
        debug_assert!(
            step_down.is_finite() && step_down > 0.0,
            "step_down must be positive and finite, got {step_down}"
        );
        Self {
            surface_z,
            target_z,
            step_down,
        }
    }

    /// Z of every pass, top to bottom. Empty when the target is not below
    /// the surface.
    pub fn pass_depths(&self) -> Vec<f64> {
        let mut depths = Vec::new();
        if self.step_down <= 0.0 {
            return depths;
        }
        let mut z = self.surface_z;
        while z > self.target_z {
            z -= self.step_down;
            if z < self.target_z + DEPTH_TOLERANCE {
                z = self.target_z;
            }
            depths.push(z);
        }
        depths
    }
}
