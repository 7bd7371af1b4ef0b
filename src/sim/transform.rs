//! Affine transforms
//!
//! Column-vector convention: `outer.times(&inner)` applies `inner` first, then
//! `outer`. Transforms are immutable values; derive new ones by composing.

use std::ops::Mul;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Determinants below this are treated as singular
const SINGULAR_EPSILON: f32 = 1e-12;

/// A 4x4 affine transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(Mat4);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    #[inline]
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    #[inline]
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    /// Uniform scale on all three axes
    #[inline]
    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation of `angle` radians about `axis` (normalized here).
    /// A zero-length axis yields the identity.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        match axis.try_normalize() {
            Some(axis) => Self(Mat4::from_axis_angle(axis, angle)),
            None => Self::IDENTITY,
        }
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    ///
    /// This maps world space into camera space; its inverse is the camera's
    /// world transform.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self(Mat4::look_at_rh(eye, target, up))
    }

    /// Compose: the result applies `inner` first, then `self`
    #[inline]
    pub fn times(&self, inner: &Transform) -> Transform {
        Self(self.0 * inner.0)
    }

    /// Transform a point (w = 1)
    #[inline]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.0.transform_point3(point)
    }

    /// Inverse, or `None` when the matrix is singular or non-finite
    pub fn try_inverse(&self) -> Option<Transform> {
        let det = self.0.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Inverse of an invertible transform.
    ///
    /// Every transform the carnival builds is an invertible affine map; calling
    /// this on a singular one is a caller bug.
    pub fn inverse(&self) -> Transform {
        debug_assert!(
            self.try_inverse().is_some(),
            "inverse of a singular transform"
        );
        Self(self.0.inverse())
    }

    /// Translation part (where the local origin lands in the parent frame)
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }

    /// Element-wise comparison with tolerance
    pub fn abs_diff_eq(&self, other: &Transform, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Mul for Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        self.times(&rhs)
    }
}

impl From<Mat4> for Transform {
    fn from(mat: Mat4) -> Self {
        Self(mat)
    }
}

/// Free-function spelling of [`Transform::times`]
#[inline]
pub fn compose(outer: &Transform, inner: &Transform) -> Transform {
    outer.times(inner)
}
