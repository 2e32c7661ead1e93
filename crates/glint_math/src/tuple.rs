//! Homogeneous points and vectors on top of `glam::DVec4`.

use crate::EPSILON;
use glam::DVec4;

/// A homogeneous 4-component tuple. `w == 1` marks a point, `w == 0` a vector.
pub type Tuple = DVec4;

/// Create a point (`w = 1`).
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 1.0)
}

/// Create a vector (`w = 0`).
#[inline]
pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 0.0)
}

/// Extension trait adding point/vector semantics to `DVec4`.
pub trait TupleExt {
    fn is_point(&self) -> bool;

    fn is_vector(&self) -> bool;

    /// Cross product of the xyz parts. The result is always a vector.
    fn cross3(&self, other: Tuple) -> Tuple;

    /// Reflect this vector around `normal`.
    fn reflect(&self, normal: Tuple) -> Tuple;

    /// Component-wise equality within [`EPSILON`].
    fn approx_eq(&self, other: Tuple) -> bool;

    /// Force `w = 0`.
    fn to_vector(&self) -> Tuple;
}

impl TupleExt for DVec4 {
    fn is_point(&self) -> bool {
        (self.w - 1.0).abs() < EPSILON
    }

    fn is_vector(&self) -> bool {
        self.w.abs() < EPSILON
    }

    fn cross3(&self, other: Tuple) -> Tuple {
        self.truncate().cross(other.truncate()).extend(0.0)
    }

    fn reflect(&self, normal: Tuple) -> Tuple {
        *self - normal * 2.0 * self.dot(normal)
    }

    fn approx_eq(&self, other: Tuple) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }

    fn to_vector(&self) -> Tuple {
        DVec4::new(self.x, self.y, self.z, 0.0)
    }
}
