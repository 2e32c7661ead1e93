// Affine transform constructors and the cached-inverse Transform value.
//
// Every shape and pattern owns a Transform. The inverse and
// inverse-transpose are derived once, when the matrix is set, so the
// per-ray path never inverts a matrix.

use crate::error::{MathError, MathResult};
use crate::{Matrix, Tuple, TupleExt};
use serde::{Deserialize, Serialize};

pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
    Matrix::from_rows([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
    Matrix::from_rows([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation around the X axis, in radians.
pub fn rotation_x(radians: f64) -> Matrix {
    let (s, c) = radians.sin_cos();
    Matrix::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation around the Y axis, in radians.
pub fn rotation_y(radians: f64) -> Matrix {
    let (s, c) = radians.sin_cos();
    Matrix::from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation around the Z axis, in radians.
pub fn rotation_z(radians: f64) -> Matrix {
    let (s, c) = radians.sin_cos();
    Matrix::from_rows([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Shear each axis in proportion to the other two.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
    Matrix::from_rows([
        [1.0, xy, xz, 0.0],
        [yx, 1.0, yz, 0.0],
        [zx, zy, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// World-to-eye transform for an eye at `from` looking at `to`.
pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Matrix {
    let forward = (to - from).normalize();
    let left = forward.cross3(up.normalize());
    let true_up = left.cross3(forward);
    let orientation = Matrix::from_rows([
        [left.x, left.y, left.z, 0.0],
        [true_up.x, true_up.y, true_up.z, 0.0],
        [-forward.x, -forward.y, -forward.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    orientation * translation(-from.x, -from.y, -from.z)
}

/// A 4x4 matrix together with its inverse and inverse-transpose.
///
/// The only way to change the matrix is to build a new `Transform`, so the
/// caches can never drift from the matrix they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix", into = "Matrix")]
pub struct Transform {
    matrix: Matrix,
    inverse: Matrix,
    inverse_transpose: Matrix,
}

impl Transform {
    /// Build a transform, rejecting singular matrices.
    pub fn try_new(matrix: Matrix) -> MathResult<Self> {
        if matrix.size() != 4 {
            return Err(MathError::UnsupportedSize(matrix.size()));
        }
        let inverse = matrix.try_inverse()?;
        Ok(Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        })
    }

    /// Build a transform.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not an invertible 4x4. A singular transform is a
    /// scene construction bug; every intersection depends on the inverse.
    pub fn new(matrix: Matrix) -> Self {
        match Self::try_new(matrix) {
            Ok(transform) => transform,
            Err(err) => panic!("invalid transform: {err}"),
        }
    }

    pub fn identity() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
            inverse_transpose: Matrix::IDENTITY,
        }
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[inline]
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    #[inline]
    pub fn inverse_transpose(&self) -> &Matrix {
        &self.inverse_transpose
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Matrix> for Transform {
    type Error = MathError;

    fn try_from(matrix: Matrix) -> MathResult<Self> {
        Self::try_new(matrix)
    }
}

impl From<Transform> for Matrix {
    fn from(t: Transform) -> Self {
        t.matrix
    }
}
