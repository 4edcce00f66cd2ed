//! Geometry kernel
//!
//! 3D vectors and affine transforms (a 3×3 linear part plus a translation).
//! Composition is matrix multiplication: `a * b` applies `b` first, then `a`.

use nalgebra::{Matrix3, Rotation3, Unit as AxisUnit, Vector3};
use std::ops::Mul;

/// A point or displacement in 3D space.
pub type Vector3D = Vector3<f64>;

/// Affine transform in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub linear: Matrix3<f64>,
    pub translation: Vector3D,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: Vector3D::zeros(),
        }
    }

    /// Builds a transform from row-major `[xx, xy, xz, x1]` style rows.
    pub fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        let linear = Matrix3::new(
            rows[0][0], rows[0][1], rows[0][2], //
            rows[1][0], rows[1][1], rows[1][2], //
            rows[2][0], rows[2][1], rows[2][2],
        );
        Self {
            linear,
            translation: Vector3D::new(rows[0][3], rows[1][3], rows[2][3]),
        }
    }

    /// Row-major `[xx, xy, xz, x1]` style rows.
    pub fn to_rows(&self) -> [[f64; 4]; 3] {
        let m = &self.linear;
        let t = &self.translation;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)], t.x],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)], t.y],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)], t.z],
        ]
    }

    pub fn translation(offset: Vector3D) -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: offset,
        }
    }

    /// Uniform scale about the origin.
    pub fn scale(factor: f64) -> Self {
        Self {
            linear: Matrix3::identity() * factor,
            translation: Vector3D::zeros(),
        }
    }

    /// Rotation by `angle` radians around `axis` (right-handed).
    ///
    /// A zero axis yields the identity.
    pub fn axis_angle(axis: Vector3D, angle: f64) -> Self {
        let linear = match AxisUnit::try_new(axis, f64::EPSILON) {
            Some(axis) => Rotation3::from_axis_angle(&axis, angle).into_inner(),
            None => Matrix3::identity(),
        };
        Self {
            linear,
            translation: Vector3D::zeros(),
        }
    }

    /// Counter-clockwise rotation in the XY plane.
    pub fn rotation_z(angle: f64) -> Self {
        Self::axis_angle(Vector3D::z(), angle)
    }

    /// Composition: the result applies `inner` first, then `self`.
    pub fn then_apply(&self, inner: &Transform) -> Transform {
        Transform {
            linear: self.linear * inner.linear,
            translation: self.linear * inner.translation + self.translation,
        }
    }

    pub fn apply_point(&self, p: &Vector3D) -> Vector3D {
        self.linear * p + self.translation
    }

    /// Applies only the linear part (for displacements).
    pub fn apply_vector(&self, v: &Vector3D) -> Vector3D {
        self.linear * v
    }

    pub fn determinant(&self) -> f64 {
        self.linear.determinant()
    }

    /// Whether the transform flips handedness, reversing arc senses.
    pub fn is_mirroring(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Length of a unit X displacement after transformation.
    pub fn length_scale(&self) -> f64 {
        self.apply_vector(&Vector3D::x()).norm()
    }

    /// Length of a unit Z displacement after transformation.
    pub fn depth_scale(&self) -> f64 {
        self.apply_vector(&Vector3D::z()).norm()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.then_apply(&rhs)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        self.then_apply(rhs)
    }
}

/// Rotates `v` by `angle` radians in the XY plane.
pub fn rotate_z(v: &Vector3D, angle: f64) -> Vector3D {
    Transform::rotation_z(angle).apply_vector(v)
}

/// Exact component-wise equality.
pub fn vectors_are_equal(a: &Vector3D, b: &Vector3D) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}

/// Unit vector in the direction of `v`, or `v` itself when it has no length.
pub fn normalize(v: &Vector3D) -> Vector3D {
    let len = v.norm();
    if len == 0.0 {
        *v
    } else {
        v / len
    }
}
