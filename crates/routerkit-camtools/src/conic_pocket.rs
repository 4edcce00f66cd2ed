//! Conic pocket (countersink) carving plan.
//!
//! The cone is approximated by a stack of concentric full circles, stepping
//! inward from the rim to the bottom diameter. Each ring's depth is linearly
//! interpolated between the edge depth at the rim and the bottom depth at
//! the bottom diameter.

use crate::error::ParameterError;

const RADIUS_TOLERANCE: f64 = 1e-9;

/// One full circle of the pocket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicRing {
    pub radius: f64,
    /// Distance below the surface, positive downward
    pub depth: f64,
}

/// Ring plan for one pocket, all lengths in native units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicPocketPlan {
    pub top_radius: f64,
    pub bottom_radius: f64,
    pub edge_depth: f64,
    pub bottom_depth: f64,
    pub radial_step: f64,
}

/// Largest radial step for a bit: a sixteenth of the native unit, or half
/// the bit's radius if that is smaller.
pub fn radial_step(tip_diameter: f64) -> f64 {
    let sixteenth: f64 = 1.0 / 16.0;
    let half_radius = tip_diameter / 4.0;
    if half_radius > 0.0 {
        sixteenth.min(half_radius)
    } else {
        sixteenth
    }
}

impl ConicPocketPlan {
    pub fn new(
        top_radius: f64,
        bottom_radius: f64,
        edge_depth: f64,
        bottom_depth: f64,
        radial_step: f64,
    ) -> Result<Self, ParameterError> {
        if bottom_radius < 0.0 || bottom_radius > top_radius {
            return Err(ParameterError::InvalidValue {
                name: "bottomDiameter".to_string(),
                reason: format!(
                    "must be between 0 and the pocket diameter, got radius {bottom_radius} for rim radius {top_radius}"
                ),
            });
        }
        if radial_step.is_nan() || radial_step <= 0.0 {
            return Err(ParameterError::NotPositive {
                name: "radial_step".to_string(),
                value: radial_step,
            });
        }
        Ok(Self {
            top_radius,
            bottom_radius,
            edge_depth,
            bottom_depth,
            radial_step,
        })
    }

    /// Depth of the cone wall at `radius`.
    pub fn depth_at(&self, radius: f64) -> f64 {
        let span = self.top_radius - self.bottom_radius;
        if span <= 0.0 {
            return self.bottom_depth;
        }
        let t = (self.top_radius - radius) / span;
        self.edge_depth + (self.bottom_depth - self.edge_depth) * t
    }

    /// Rings from the rim inward; the last one is at the bottom radius.
    pub fn rings(&self) -> Vec<ConicRing> {
        let mut rings = Vec::new();
        let mut radius = self.top_radius;
        loop {
            rings.push(ConicRing {
                radius,
                depth: self.depth_at(radius),
            });
            if radius <= self.bottom_radius + RADIUS_TOLERANCE {
                break;
            }
            radius -= self.radial_step;
            if radius < self.bottom_radius + RADIUS_TOLERANCE {
                radius = self.bottom_radius;
            }
        }
        rings
    }
}
