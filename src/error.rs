//! Errors raised by element access and structural validation.

use thiserror::Error;

/// Errors from the matrix/vector capability traits.
///
/// Bounds and mutation errors are reported at the call site by the checked
/// accessors (`get` / `set`). Structural errors are only produced by an
/// explicit call to `validate()`.
///
/// ```
/// use matview::{DynMatrix, MatrixRef, MatrixError};
///
/// let m = DynMatrix::zeros(2, 2, 0.0_f64);
/// assert_eq!(
///     m.get(2, 0),
///     Err(MatrixError::IndexOutOfBounds { row: 2, col: 0, nrows: 2, ncols: 2 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Matrix coordinates outside the shape.
    #[error("index ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// Vector index outside the length.
    #[error("index {index} out of bounds for vector of length {len}")]
    VectorIndexOutOfBounds { index: usize, len: usize },

    /// The representation does not support arbitrary element writes.
    #[error("unsupported mutation: {0}")]
    Unsupported(&'static str),

    /// Nonzero write to an element that the representation fixes at zero.
    #[error("element ({row}, {col}) lies outside the stored band range and is fixed at zero")]
    FixedZero { row: usize, col: usize },

    /// Index sequence is not a bijection on `[0, n)`.
    #[error("not a permutation: position {index} maps to {value}, which is out of range or repeated")]
    NotAPermutation { index: usize, value: usize },

    /// Recorded size disagrees with the index sequence.
    #[error("permutation size {size} does not match index length {len}")]
    SizeMismatch { size: usize, len: usize },

    /// Declared lower band limit reaches past the first column.
    #[error("invalid lower band limit {limit} for matrix with {nrows} rows")]
    InvalidLowerLimit { limit: isize, nrows: usize },

    /// Declared upper band limit reaches past the last column.
    #[error("invalid upper band limit {limit} for matrix with {ncols} columns")]
    InvalidUpperLimit { limit: isize, ncols: usize },

    /// A stored band has the wrong length for the matrix shape.
    #[error("band {band} has length {got}, expected {expected}")]
    InvalidBandLength {
        band: isize,
        expected: usize,
        got: usize,
    },
}
