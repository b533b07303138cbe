use alloc::vec;
use alloc::vec::Vec;

use crate::traits::Scalar;

use super::Banded;

/// Square tridiagonal matrix: main diagonal plus one band on each side.
///
/// ```
/// use matview::{Banded, MatrixRef, TridiagonalMatrix};
///
/// let t = TridiagonalMatrix::from_bands(
///     vec![3.0, 3.0, 3.0],
///     vec![1.0, 1.0, 1.0, 1.0],
///     vec![2.0, 2.0, 2.0],
/// );
/// assert_eq!(t.at(1, 2), 2.0);
/// assert_eq!(t.at(2, 1), 3.0);
/// assert_eq!(t.at(0, 3), 0.0);
/// assert_eq!((t.lower_bandwidth(), t.upper_bandwidth()), (-1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix<T> {
    sub: Vec<T>,
    diag: Vec<T>,
    sup: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Scalar> TridiagonalMatrix<T> {
    /// All-zero `n x n` matrix.
    pub fn zeros(n: usize, _zero: T) -> Self {
        let off = n.saturating_sub(1);
        Self {
            sub: vec![T::zero(); off],
            diag: vec![T::zero(); n],
            sup: vec![T::zero(); off],
            nrows: n,
            ncols: n,
        }
    }

    /// Build from the three bands. The size is `diag.len()`.
    ///
    /// Off-diagonal lengths are not checked here; see `validate`.
    pub fn from_bands(sub: Vec<T>, diag: Vec<T>, sup: Vec<T>) -> Self {
        let n = diag.len();
        Self {
            sub,
            diag,
            sup,
            nrows: n,
            ncols: n,
        }
    }

    /// `y = A x` in O(n).
    ///
    /// Panics if `x.len()` is not the matrix size.
    pub fn mul_vec(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.ncols, "vector length mismatch");
        (0..self.nrows).map(|r| self.row_dot(r, x)).collect()
    }
}

impl<T: Scalar> Banded<T> for TridiagonalMatrix<T> {
    #[inline]
    fn lower_bandwidth_limit(&self) -> isize {
        if self.nrows > 1 {
            -1
        } else {
            0
        }
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
            -1 => &self.sub,
            0 => &self.diag,
            1 => &self.sup,
            _ => &[],
        }
    }

    #[inline]
    fn band_mut(&mut self, b: isize) -> &mut [T] {
        match b {
            -1 => &mut self.sub,
            0 => &mut self.diag,
            1 => &mut self.sup,
            _ => &mut [],
        }
    }
}

impl_banded_matrix!(TridiagonalMatrix);
