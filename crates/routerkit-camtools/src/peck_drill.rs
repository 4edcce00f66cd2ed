//! Peck drilling for holes no wider than the bit.
//!
//! Each plunge goes one step below the height the bit was last retracted
//! to, then backs off half a step to clear chips, so every cycle advances
//! the hole by half a step. The final plunge stops on the target and is not
//! followed by a retract.

const DEPTH_TOLERANCE: f64 = 1e-9;

/// One plunge and the partial retract after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeckStroke {
    pub plunge_z: f64,
    /// `None` for the final plunge
    pub retract_z: Option<f64>,
}

/// Peck cycle between two heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeckCycle {
    pub surface_z: f64,
    pub target_z: f64,
    pub step_down: f64,
}

impl PeckCycle {
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

    /// Back-off distance after each plunge.
    pub fn step_up(&self) -> f64 {
        self.step_down / 2.0
    }

    pub fn strokes(&self) -> Vec<PeckStroke> {
        let mut strokes = Vec::new();
        if self.step_down <= 0.0 {
            return strokes;
        }
        let mut top = self.surface_z;
        while top > self.target_z {
            let mut plunge_z = top - self.step_down;
            if plunge_z < self.target_z + DEPTH_TOLERANCE {
                plunge_z = self.target_z;
            }
            if plunge_z <= self.target_z {
                strokes.push(PeckStroke {
                    plunge_z,
                    retract_z: None,
                });
                break;
            }
            let retract_z = plunge_z + self.step_up();
            strokes.push(PeckStroke {
                plunge_z,
                retract_z: Some(retract_z),
            });
            top = retract_z;
        }
        strokes
    }
}
