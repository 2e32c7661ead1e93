//! Dense square matrices from 1x1 up to 4x4.
//!
//! Submatrices shrink the size by one, so the determinant of a 4x4 is
//! computed by cofactor expansion down to 2x2 blocks.

use crate::error::{MathError, MathResult};
use crate::{Tuple, EPSILON};
use glam::DMat4;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A square matrix of size 1 to 4, stored row-major.
///
/// Cells outside `size x size` are always zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: [[f64; 4]; 4],
    size: usize,
}

impl Matrix {
    /// The 4x4 identity.
    pub const IDENTITY: Matrix = Matrix {
        data: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        size: 4,
    };

    /// Build an `N x N` matrix from its rows.
    pub fn from_rows<const N: usize>(rows: [[f64; N]; N]) -> Self {
        assert!((1..=4).contains(&N), "matrix size must be 1 to 4");
        let mut data = [[0.0; 4]; 4];
        for (r, row) in rows.iter().enumerate() {
            data[r][..N].copy_from_slice(row);
        }
        Self { data, size: N }
    }

    /// The 4x4 identity.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.size && col < self.size);
        self.data[row][col]
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (r, row) in data.iter_mut().enumerate().take(self.size) {
            for (c, cell) in row.iter_mut().enumerate().take(self.size) {
                *cell = self.data[c][r];
            }
        }
        Self {
            data,
            size: self.size,
        }
    }

    /// Copy of this matrix with `row` and `col` removed.
    pub fn submatrix(&self, row: usize, col: usize) -> Self {
        let mut data = [[0.0; 4]; 4];
        let rows = (0..self.size).filter(|&r| r != row);
        for (dst_r, src_r) in rows.enumerate() {
            let cols = (0..self.size).filter(|&c| c != col);
            for (dst_c, src_c) in cols.enumerate() {
                data[dst_r][dst_c] = self.data[src_r][src_c];
            }
        }
        Self {
            data,
            size: self.size - 1,
        }
    }

    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        match self.size {
            1 => self.data[0][0],
            2 => self.data[0][0] * self.data[1][1] - self.data[0][1] * self.data[1][0],
            n => (0..n).map(|c| self.data[0][c] * self.cofactor(0, c)).sum(),
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Inverse via the cofactor matrix. Fails on a zero determinant.
    pub fn try_inverse(&self) -> MathResult<Self> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(MathError::NotInvertible { determinant });
        }

        let mut data = [[0.0; 4]; 4];
        for r in 0..self.size {
            for c in 0..self.size {
                // Transposed write: cofactor(r, c) lands at (c, r)
                data[c][r] = self.cofactor(r, c) / determinant;
            }
        }
        Ok(Self {
            data,
            size: self.size,
        })
    }

    /// Element-wise equality within [`EPSILON`].
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.size == other.size
            && (0..self.size)
                .all(|r| (0..self.size).all(|c| (self.data[r][c] - other.data[r][c]).abs() < EPSILON))
    }

    /// Multiply a tuple, skipping zero coefficients.
    ///
    /// Bounding boxes carry infinite extents, and `0 * inf` would poison
    /// the result with NaN.
    pub fn mul_tuple_sparse(&self, t: Tuple) -> Tuple {
        let src = t.to_array();
        let mut out = [0.0; 4];
        for (r, cell) in out.iter_mut().enumerate() {
            *cell = (0..4)
                .filter(|&c| self.data[r][c] != 0.0)
                .map(|c| self.data[r][c] * src[c])
                .sum();
        }
        Tuple::from_array(out)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix {
    /// Matrices compare with the system tolerance.
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        assert_eq!(self.size, rhs.size, "cannot multiply matrices of different sizes");
        let n = self.size;
        let mut data = [[0.0; 4]; 4];
        for (r, row) in data.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = (0..n).map(|k| self.data[r][k] * rhs.data[k][c]).sum();
            }
        }
        Matrix { data, size: n }
    }
}

impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        assert_eq!(self.size, 4, "tuples multiply with 4x4 matrices only");
        let src = t.to_array();
        let mut out = [0.0; 4];
        for (r, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|c| self.data[r][c] * src[c]).sum();
        }
        Tuple::from_array(out)
    }
}

impl Mul<Tuple> for &Matrix {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        *self * t
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MathError;

    fn try_from(rows: Vec<Vec<f64>>) -> MathResult<Self> {
        let size = rows.len();
        if size == 0 || size > 4 {
            return Err(MathError::UnsupportedSize(size));
        }
        let mut data = [[0.0; 4]; 4];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(MathError::DimensionMismatch {
                    expected: size,
                    actual: row.len(),
                });
            }
            data[r][..size].copy_from_slice(row);
        }
        Ok(Self { data, size })
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        (0..m.size).map(|r| m.data[r][..m.size].to_vec()).collect()
    }
}

impl From<DMat4> for Matrix {
    fn from(m: DMat4) -> Self {
        // glam is column-major
        Self {
            data: m.transpose().to_cols_array_2d(),
            size: 4,
        }
    }
}

impl From<Matrix> for DMat4 {
    fn from(m: Matrix) -> Self {
        assert_eq!(m.size, 4, "only 4x4 matrices convert to DMat4");
        DMat4::from_cols_array_2d(&m.data).transpose()
    }
}
