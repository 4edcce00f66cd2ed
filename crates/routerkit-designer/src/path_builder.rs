//! # Path Builder
//!
//! Cursor-style construction of [`Path`]s: straight runs, rounded or
//! chamfered corners, and loops closed back onto their first vertex.
//!
//! Vertices are shared by exact coordinate match, so returning to a point
//! already on the path reuses its index instead of adding a duplicate.

use crate::model::{Path, PathSegment, RotationSense};
use routerkit_core::geometry::normalize;
use routerkit_core::Vector3D;
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

/// A full turn in radians.
pub const FULL_TURN: f64 = std::f64::consts::TAU;
/// A quarter turn in radians.
pub const QUARTER_TURN: f64 = FRAC_PI_2;
/// An eighth of a turn in radians.
pub const EIGHTH_TURN: f64 = std::f64::consts::FRAC_PI_4;

/// How a corner with a non-zero radius is cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerStyle {
    /// Circular fillet
    #[default]
    Round,
    /// Straight bevel between the fillet's endpoints
    Chamfer,
}

/// Cosine and sine of `angle`, exact for whole multiples of a quarter turn.
fn cos_sin(angle: f64) -> (f64, f64) {
    let quarters = angle / FRAC_PI_2;
    let whole = quarters.round();
    if (quarters - whole).abs() < 1e-12 {
        match (whole as i64).rem_euclid(4) {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        }
    } else {
        (angle.cos(), angle.sin())
    }
}

/// Rotates `v` counter-clockwise about +Z.
fn rotate(v: &Vector3D, angle: f64) -> Vector3D {
    let (c, s) = cos_sin(angle);
    Vector3D::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Key under which a vertex is deduplicated. `-0.0` and `0.0` share a key.
fn vertex_key(v: &Vector3D) -> [u64; 3] {
    [
        (v.x + 0.0).to_bits(),
        (v.y + 0.0).to_bits(),
        (v.z + 0.0).to_bits(),
    ]
}

/// Stateful path constructor
#[derive(Debug, Clone)]
pub struct PathBuilder {
    path: Path,
    current: usize,
    direction: Vector3D,
    index: HashMap<[u64; 3], usize>,
}

impl PathBuilder {
    /// Starts a path at `start`, heading along +X.
    pub fn new(start: Vector3D) -> Self {
        let mut index = HashMap::new();
        index.insert(vertex_key(&start), 0);
        Self {
            path: Path::new(vec![start], Vec::new()),
            current: 0,
            direction: Vector3D::x(),
            index,
        }
    }

    fn find_vertex(&mut self, position: Vector3D) -> usize {
        let key = vertex_key(&position);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        self.path.vertices.push(position);
        let idx = self.path.vertices.len() - 1;
        self.index.insert(key, idx);
        idx
    }

    pub fn current_position(&self) -> Vector3D {
        self.path.vertices[self.current]
    }

    /// Unit vector the cursor is heading along.
    pub fn current_direction(&self) -> Vector3D {
        self.direction
    }

    /// Straight run to `target`. Does nothing if already there.
    pub fn line_to(&mut self, target: Vector3D) -> &mut Self {
        if target == self.current_position() {
            return self;
        }
        let end = self.find_vertex(target);
        self.path.segments.push(PathSegment::Straight {
            start: self.current,
            end,
        });
        self.direction = normalize(&(self.path.vertices[end] - self.current_position()));
        self.current = end;
        self
    }

    /// Turns by `angle` radians (positive is counter-clockwise).
    ///
    /// With a non-zero `radius` the corner is cut as a fillet of that radius
    /// starting at the current position; with zero radius only the heading
    /// changes.
    pub fn turn(&mut self, angle: f64, radius: f64, style: CornerStyle) -> &mut Self {
        if radius != 0.0 {
            let start = self.current_position();
            let forward = self.direction * radius;
            let side = if angle > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            let to_axis_from_start = rotate(&forward, side);
            let to_axis_from_end = rotate(&to_axis_from_start, angle);
            let axis_position = start + to_axis_from_start;
            let end_position = axis_position - to_axis_from_end;

            let axis = self.find_vertex(axis_position);
            let end = self.find_vertex(end_position);
            let segment = match style {
                CornerStyle::Round => PathSegment::Arc {
                    start: self.current,
                    end,
                    axis,
                    sense: RotationSense::from_angle(angle),
                },
                CornerStyle::Chamfer => PathSegment::Straight {
                    start: self.current,
                    end,
                },
            };
            self.path.segments.push(segment);
            self.current = end;
        }
        self.direction = rotate(&self.direction, angle);
        self
    }

    /// Straight run towards `corner`, stopping where a fillet of `radius`
    /// turning by `angle` has to begin for its far end to land on the next
    /// edge.
    pub fn line_to_corner_start(&mut self, corner: Vector3D, angle: f64, radius: f64) -> &mut Self {
        let forward = corner - self.current_position();
        let forward_length = forward.norm();
        let (c, s) = cos_sin(angle.abs());
        // Tangent length of the fillet; a U-turn consumes the whole run.
        let corner_length = if radius == 0.0 {
            0.0
        } else if 1.0 + c <= 0.0 {
            forward_length
        } else {
            (radius.abs() * s / (1.0 + c)).min(forward_length)
        };
        if corner_length == 0.0 || forward_length == 0.0 {
            return self.line_to(corner);
        }
        let target = corner - normalize(&forward) * corner_length;
        self.line_to(target)
    }

    /// Straight run back to the first vertex.
    pub fn close_loop(&mut self) -> &mut Self {
        let first = self.path.vertices[0];
        self.line_to(first)
    }

    /// The path built so far.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}
