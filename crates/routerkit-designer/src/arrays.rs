//! # Array Operations Module
//!
//! Rectangular grids of cut instances. A grid is a [`Compound`] whose
//! transforms are the grid's translations, so arrays need no support from
//! backends.

use crate::cut::{Compound, Cut, Transformish};

/// Parameters for a rectangular grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularArrayParams {
    pub x0: f64,
    pub y0: f64,
    /// Spacing between columns; zero is treated as one
    pub dx: f64,
    /// Spacing between rows; zero is treated as one
    pub dy: f64,
    pub count_x: u32,
    pub count_y: u32,
}

impl RectangularArrayParams {
    pub fn new(count_x: u32, count_y: u32, dx: f64, dy: f64) -> Self {
        debug_assert!(dx.is_finite(), "dx must be finite, got {dx}");
        debug_assert!(dy.is_finite(), "dy must be finite, got {dy}");
        Self {
            x0: 0.0,
            y0: 0.0,
            dx,
            dy,
            count_x,
            count_y,
        }
    }

    pub fn with_origin(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }

    /// Get total number of copies
    pub fn total_copies(&self) -> u32 {
        self.count_x * self.count_y
    }
}

fn no_zero(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x
    }
}

/// Grid positions as XY offsets.
///
/// Positions along the more tightly spaced axis are visited first, so
/// consecutive instances are as close together as possible.
pub fn rectangular_array_points(params: &RectangularArrayParams) -> Vec<Transformish> {
    let dx = no_zero(params.dx);
    let dy = no_zero(params.dy);
    let at = |i: u32, j: u32| Transformish::offset(params.x0 + dx * i as f64, params.y0 + dy * j as f64);

    let mut points = Vec::with_capacity(params.total_copies() as usize);
    if params.dx < params.dy {
        for j in 0..params.count_y {
            for i in 0..params.count_x {
                points.push(at(i, j));
            }
        }
    } else {
        for i in 0..params.count_x {
            for j in 0..params.count_y {
                points.push(at(i, j));
            }
        }
    }
    points
}

/// Instances `cuts` at every grid position.
pub fn rectangular_array(cuts: Vec<Cut>, params: &RectangularArrayParams) -> Cut {
    Cut::Compound(Compound::new(cuts).with_transforms(rectangular_array_points(params)))
}
