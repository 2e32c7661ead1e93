use thiserror::Error;

/// Errors raised by matrix construction and inversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("matrix is not invertible (determinant {determinant})")]
    NotInvertible { determinant: f64 },

    #[error("matrix row has {actual} columns, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unsupported matrix size {0}, expected 1 to 4")]
    UnsupportedSize(usize),
}

/// Result type for fallible math operations.
pub type MathResult<T> = Result<T, MathError>;
