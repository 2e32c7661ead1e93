//! Glint math: homogeneous tuples, dense matrices, affine transforms,
//! rays and axis-aligned bounding boxes.
//!
//! Points and vectors are `glam::DVec4` values with `w = 1` and `w = 0`
//! respectively. Matrices are kept as a small dense type with cofactor
//! inversion so 2x2 and 3x3 minors are first-class.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod error;
mod interval;
mod matrix;
mod ray;
mod transform;
mod tuple;

pub use aabb::{check_axis, Aabb};
pub use error::MathError;
pub use interval::Interval;
pub use matrix::Matrix;
pub use ray::Ray;
pub use transform::{
    rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform, Transform,
};
pub use tuple::{point, vector, Tuple, TupleExt};

/// Tolerance used for every approximate floating point comparison.
pub const EPSILON: f64 = 0.0001;

/// Returns true if `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
