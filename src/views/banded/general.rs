use alloc::vec;
use alloc::vec::Vec;

use crate::traits::{MatrixRef, Scalar};

use super::{band_length, Banded};

/// Banded matrix with arbitrary declared limits.
///
/// Bands are stored as separate vectors, `bands[b - lower]` for
/// `b` in `lower..=upper`.
///
/// ```
/// use matview::{Banded, BandedMatrix, MatrixRef};
///
/// // 4x4 with one subdiagonal and two superdiagonals
/// let mut a = BandedMatrix::zeros(4, 4, -1, 2, 0.0_f64);
/// a.band_mut(2).copy_from_slice(&[5.0, 6.0]);
/// assert_eq!(a.at(1, 3), 6.0);
/// assert_eq!(a.upper_bandwidth(), 2);
/// assert_eq!(a.lower_bandwidth(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix<T> {
    bands: Vec<Vec<T>>,
    lower: isize,
    upper: isize,
    nrows: usize,
    ncols: usize,
}

impl<T: Scalar> BandedMatrix<T> {
    /// All-zero matrix storing bands `lower..=upper`.
    ///
    /// Panics if `lower > 0` or `upper < 0`.
    pub fn zeros(nrows: usize, ncols: usize, lower: isize, upper: isize, _zero: T) -> Self {
        assert!(
            lower <= 0 && upper >= 0,
            "band limits [{}, {}] must bracket the main diagonal",
            lower,
            upper,
        );
        let bands = (lower..=upper)
            .map(|b| vec![T::zero(); band_length(nrows, ncols, b)])
            .collect();
        Self {
            bands,
            lower,
            upper,
            nrows,
            ncols,
        }
    }

    /// Take ownership of pre-built bands, lowest offset first. The upper
    /// limit is `lower + bands.len() - 1`.
    ///
    /// Band lengths are not checked here; see `validate`.
    pub fn from_bands(nrows: usize, ncols: usize, lower: isize, bands: Vec<Vec<T>>) -> Self {
        assert!(!bands.is_empty(), "at least one band is required");
        let upper = lower + bands.len() as isize - 1;
        Self {
            bands,
            lower,
            upper,
            nrows,
            ncols,
        }
    }

    /// Copy bands `lower..=upper` out of `a`. Entries outside that range
    /// are dropped.
    pub fn from_dense<M: MatrixRef<T> + ?Sized>(a: &M, lower: isize, upper: isize) -> Self {
        let (nrows, ncols) = a.shape();
        let mut out = Self::zeros(nrows, ncols, lower, upper, T::zero());
        for b in lower..=upper {
            let (r0, c0) = if b >= 0 { (0, b as usize) } else { (b.unsigned_abs(), 0) };
            for (k, x) in out.band_mut(b).iter_mut().enumerate() {
                *x = a.at(r0 + k, c0 + k);
            }
        }
        out
    }
}

impl<T: Scalar> Banded<T> for BandedMatrix<T> {
    #[inline]
    fn lower_bandwidth_limit(&self) -> isize {
        self.lower
    }

    #[inline]
    fn upper_bandwidth_limit(&self) -> isize {
        self.upper
    }

    #[inline]
    fn band(&self, b: isize) -> &[T] {
        if b < self.lower || b > self.upper {
            return &[];
        }
        &self.bands[(b - self.lower) as usize]
    }

    #[inline]
    fn band_mut(&mut self, b: isize) -> &mut [T] {
        if b < self.lower || b > self.upper {
            return &mut [];
        }
        &mut self.bands[(b - self.lower) as usize]
    }
}

impl_banded_matrix!(BandedMatrix);
