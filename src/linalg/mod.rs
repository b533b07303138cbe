//! Pivoted QR and bidiagonal decompositions.
//!
//! Decompositions are stateful service objects: create one, call
//! `decompose`, then read the factors. A failed `decompose` leaves nothing
//! readable. The services are reused through the [`PivotedQr`] and
//! [`BidiagonalDecomposition`] traits so that [`TallBidiagonal`] can be
//! built on any implementation of either.

pub(crate) mod bidiagonal;
pub(crate) mod qrp;
pub(crate) mod tall;

pub use bidiagonal::BidiagonalRow;
pub use qrp::HouseholderQrp;
pub use tall::{prefers_tall, TallBidiagonal, TallBidiagonalSettings};

use thiserror::Error;

use crate::dynmatrix::DynMatrix;
use crate::traits::{FloatScalar, MatrixRef};
use crate::views::{BidiagonalMatrix, PermutationMatrix};

/// Errors from the decompositions.
///
/// ```
/// use matview::DynMatrix;
/// use matview::linalg::LinalgError;
///
/// let a = DynMatrix::from_rows(2, 1, &[1.0_f64, f64::NAN]);
/// assert_eq!(a.bidiagonal().unwrap_err(), LinalgError::NonFinite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// The input contains NaN or an infinity.
    #[error("matrix contains a non-finite element")]
    NonFinite,
    /// A Householder reflector could not be formed (norm overflowed).
    #[error("numerical breakdown while forming a reflector")]
    Breakdown,
}

/// Lifecycle of a decomposition object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecompositionState {
    #[default]
    Undecomposed,
    Decomposed,
    Failed,
}

/// Fail with [`LinalgError::NonFinite`] if any element is NaN or infinite.
pub(crate) fn check_finite<T: FloatScalar, M: MatrixRef<T> + ?Sized>(
    a: &M,
) -> Result<(), LinalgError> {
    for i in 0..a.nrows() {
        let finite = match a.dense_row(i) {
            Some(row) => row.iter().all(|x| x.is_finite()),
            None => (0..a.ncols()).all(|j| a.at(i, j).is_finite()),
        };
        if !finite {
            return Err(LinalgError::NonFinite);
        }
    }
    Ok(())
}

/// Euclidean norm of `values`, computed on the values divided by their
/// largest magnitude so the squares neither overflow nor underflow.
pub(crate) fn scaled_norm<T, I>(values: I) -> T
where
    T: FloatScalar,
    I: Iterator<Item = T> + Clone,
{
    let max = values.clone().fold(T::zero(), |m, x| m.max(x.abs()));
    if max == T::zero() {
        return T::zero();
    }
    values
        .fold(T::zero(), |s, x| {
            let y = x / max;
            s + y * y
        })
        .sqrt()
        * max
}

/// QR decomposition with column pivoting: `A · P = Q · R`.
pub trait PivotedQr<T: FloatScalar> {
    /// Columns whose remaining norm is at most `threshold` are treated as
    /// negligible and end the factorization.
    fn set_singular_threshold(&mut self, threshold: T);

    fn decompose<M: MatrixRef<T> + ?Sized>(&mut self, a: &M) -> Result<(), LinalgError>;

    /// Upper-triangular factor: `min(m,n) x n` compact, `m x n` full.
    fn r(&self, compact: bool) -> DynMatrix<T>;

    /// Orthogonal factor: `m x min(m,n)` compact, `m x m` full.
    fn q(&self, compact: bool) -> DynMatrix<T>;

    /// The column permutation `P`.
    fn pivot_matrix(&self) -> PermutationMatrix<T>;

    /// Whether `decompose` wrote into the caller's matrix.
    fn input_modified(&self) -> bool;
}

/// Bidiagonal decomposition `A = U · B · Vᵀ` with `B` upper bidiagonal.
///
/// With `min = min(m, n)` and `w = min + 1` when `n > m` (else `min`),
/// compact factors are `U: m x min`, `B: min x w`, `V: n x w`; full
/// factors are `m x m`, `m x n` and `n x n`.
pub trait BidiagonalDecomposition<T: FloatScalar> {
    fn decompose<M: MatrixRef<T> + ?Sized>(&mut self, a: &M) -> Result<(), LinalgError>;

    /// Shape of the decomposed matrix.
    fn shape(&self) -> (usize, usize);

    fn u(&self, transpose: bool, compact: bool) -> DynMatrix<T>;

    fn v(&self, transpose: bool, compact: bool) -> DynMatrix<T>;

    /// The diagonal and superdiagonal of `B`, without copying.
    fn diagonal(&self) -> (&[T], &[T]);

    /// Whether `decompose` wrote into the caller's matrix.
    fn input_modified(&self) -> bool;

    /// `B` as a structured matrix of its compact shape.
    fn bidiagonal(&self) -> BidiagonalMatrix<T> {
        let (m, n) = self.shape();
        let min = m.min(n);
        let w = if n > m { min + 1 } else { min };
        let (diag, off) = self.diagonal();
        BidiagonalMatrix::from_parts(min, w, diag.to_vec(), off.to_vec())
    }

    /// `B` as a dense matrix, compact or zero-padded to `m x n`.
    fn b(&self, compact: bool) -> DynMatrix<T> {
        let dense = self.bidiagonal().to_dense();
        if compact {
            return dense;
        }
        let (m, n) = self.shape();
        let mut full = DynMatrix::zeros(m, n, T::zero());
        full.set_block(0, 0, &dense);
        full
    }
}
