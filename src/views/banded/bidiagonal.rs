use alloc::vec;
use alloc::vec::Vec;

use crate::traits::Scalar;

use super::{band_length, Banded};

/// Upper bidiagonal matrix: a main diagonal and one superdiagonal.
///
/// This is the shape of the `B` factor of a bidiagonal decomposition. For
/// `nrows >= ncols` the superdiagonal has `ncols - 1` entries; for a wide
/// matrix with `ncols > nrows` it has `nrows`, the last one sitting past the
/// end of the diagonal.
///
/// ```
/// use matview::{BidiagonalMatrix, MatrixRef};
///
/// let b = BidiagonalMatrix::from_parts(2, 3, vec![1.0, 2.0], vec![3.0, 4.0]);
/// assert_eq!(b.at(0, 1), 3.0);
/// assert_eq!(b.at(1, 2), 4.0);
/// assert_eq!(b.at(1, 0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BidiagonalMatrix<T> {
    diag: Vec<T>,
    sup: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Scalar> BidiagonalMatrix<T> {
    /// All-zero `nrows x ncols` matrix.
    pub fn zeros(nrows: usize, ncols: usize, _zero: T) -> Self {
        Self {
            diag: vec![T::zero(); band_length(nrows, ncols, 0)],
            sup: vec![T::zero(); band_length(nrows, ncols, 1)],
            nrows,
            ncols,
        }
    }

    /// Build from the two bands. Lengths are not checked here; see
    /// `validate`.
    pub fn from_parts(nrows: usize, ncols: usize, diag: Vec<T>, sup: Vec<T>) -> Self {
        Self {
            diag,
            sup,
            nrows,
            ncols,
        }
    }

    #[inline]
    pub fn diagonal(&self) -> &[T] {
        &self.diag
    }

    #[inline]
    pub fn superdiagonal(&self) -> &[T] {
        &self.sup
    }

    #[inline]
    pub fn diagonal_mut(&mut self) -> &mut [T] {
        &mut self.diag
    }

    #[inline]
    pub fn superdiagonal_mut(&mut self) -> &mut [T] {
        &mut self.sup
    }

    /// Split into `(diagonal, superdiagonal)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.diag, self.sup)
    }
}

impl<T: Scalar> Banded<T> for BidiagonalMatrix<T> {
    #[inline]
    fn lower_bandwidth_limit(&self) -> isize {
        0
    }

    #[inline]
    fn upper_bandwidth_limit(&self) -> isize {
        if self.ncols > 1 {
            1
        } else {
            0
        }
    }

    #[inline]
    fn band(&self, b: isize) -> &[T] {
        match b {
            0 => &self.diag,
            1 => &self.sup,
            _ => &[],
        }
    }

    #[inline]
    fn band_mut(&mut self, b: isize) -> &mut [T] {
        match b {
            0 => &mut self.diag,
            1 => &mut self.sup,
            _ => &mut [],
        }
    }
}

impl_banded_matrix!(BidiagonalMatrix);
