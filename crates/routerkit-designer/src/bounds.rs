//! Bounding-box backend
//!
//! Walks a cut tree like the G-code generator does but only records the
//! extent of the material each leaf touches.

use routerkit_core::{Error, Vector3D};
use serde::{Deserialize, Serialize};

use crate::cut::ConicPocket;
use crate::interpreter::{CutProcessor, TraversalState};
use crate::model::{Path, PathSegment};

/// Axis-aligned box accumulated point by point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Empty bounds; any update replaces them.
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn update_point(&mut self, p: &Vector3D) {
        self.update(p.x, p.y, p.z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y && self.min_z <= self.max_z
    }

    /// Grows the box by `amount` on every side.
    pub fn pad(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            max_x: self.max_x + amount,
            min_y: self.min_y - amount,
            max_y: self.max_y + amount,
            min_z: self.min_z - amount,
            max_z: self.max_z + amount,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Cut processor collecting [`Bounds`]
#[derive(Debug, Clone, Default)]
pub struct BoundsFinder {
    pub bounds: Bounds,
}

impl BoundsFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A horizontal disc at two heights.
    fn add_disc(&mut self, center: &Vector3D, radius: f64, top: f64, bottom: f64) {
        for z in [top, bottom] {
            self.bounds.update(center.x - radius, center.y - radius, z);
            self.bounds.update(center.x + radius, center.y + radius, z);
        }
    }
}

impl CutProcessor for BoundsFinder {
    type Error = Error;

    fn process_path(&mut self, state: &TraversalState<'_>, path: &Path) -> Result<(), Error> {
        for segment in &path.segments {
            for index in [segment.start(), segment.end()] {
                let local = path.vertices[index];
                let placed = state.place(&local);
                self.bounds.update_point(&placed);
                self.bounds.update(placed.x, placed.y, state.target_z(&local));
            }
            // Arcs may bulge past their endpoints; take the whole circle.
            if let PathSegment::Arc { start, axis, .. } = *segment {
                let center = state.place(&path.vertices[axis]);
                let radius = (state.place(&path.vertices[start]) - center).xy().norm();
                let top = center.z;
                let bottom = state.target_z(&path.vertices[axis]);
                self.add_disc(&center, radius, top, bottom);
            }
        }
        Ok(())
    }

    fn process_circle(&mut self, state: &TraversalState<'_>, diameter: f64) -> Result<(), Error> {
        let center = state.place(&Vector3D::zeros());
        let radius = state.native_length(diameter) / 2.0;
        let bottom = state.target_z(&Vector3D::zeros());
        self.add_disc(&center, radius, center.z, bottom);
        Ok(())
    }

    fn process_conic_pocket(
        &mut self,
        state: &TraversalState<'_>,
        pocket: &ConicPocket,
    ) -> Result<(), Error> {
        let center = state.place(&Vector3D::zeros());
        let radius = state.native_length(pocket.diameter) / 2.0;
        let top = center.z - state.native_depth(pocket.edge_depth);
        let bottom = state.clamp_z(center.z - state.native_depth(pocket.bottom_depth));
        self.add_disc(&center, radius, top, bottom);
        Ok(())
    }

    fn process_pause(&mut self, _state: &TraversalState<'_>) -> Result<(), Error> {
        Ok(())
    }
}
