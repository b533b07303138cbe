//! Banded matrices stored one diagonal ("band") at a time.
//!
//! Band `b` holds the entries at column-minus-row offset `b`: `0` is the
//! main diagonal, positive offsets lie above it and negative ones below.
//! Each layout declares a range of bands it can store,
//! `[lower_bandwidth_limit, upper_bandwidth_limit]`; everything outside that
//! range reads as zero and can't be set to anything else.
//!
//! Within band `b`, element `(row, col)` lives at position `min(row, col)`,
//! so every band starts at the top-left edge of the matrix and has
//! [`band_length`] entries.

use core::marker::PhantomData;

use crate::error::MatrixError;
use crate::traits::{MatrixRef, Scalar, VectorMut, VectorRef};

macro_rules! impl_banded_matrix {
    ($ty:ident) => {
        impl<T: $crate::traits::Scalar> $crate::traits::MatrixRef<T> for $ty<T> {
            #[inline]
            fn nrows(&self) -> usize {
                self.nrows
            }

            #[inline]
            fn ncols(&self) -> usize {
                self.ncols
            }

            #[inline]
            fn at(&self, row: usize, col: usize) -> T {
                $crate::views::Banded::band_at(self, row, col)
            }

            fn validate(&self) -> Result<(), $crate::error::MatrixError> {
                $crate::views::Banded::validate_bands(self)
            }
        }

        impl<T: $crate::traits::Scalar> $crate::traits::MatrixMut<T> for $ty<T> {
            #[inline]
            fn set_at(
                &mut self,
                row: usize,
                col: usize,
                value: T,
            ) -> Result<(), $crate::error::MatrixError> {
                $crate::views::Banded::set_band_at(self, row, col, value)
            }
        }
    };
}

mod bidiagonal;
mod general;
mod tridiagonal;

pub use bidiagonal::BidiagonalMatrix;
pub use general::BandedMatrix;
pub use tridiagonal::TridiagonalMatrix;

/// Number of entries on band `b` of an `nrows x ncols` matrix.
///
/// ```
/// use matview::views::band_length;
/// assert_eq!(band_length(4, 4, 0), 4);
/// assert_eq!(band_length(4, 4, -1), 3);
/// assert_eq!(band_length(2, 5, 1), 2);
/// assert_eq!(band_length(2, 5, 4), 1);
/// assert_eq!(band_length(2, 5, -2), 0);
/// ```
pub fn band_length(nrows: usize, ncols: usize, b: isize) -> usize {
    let off = b.unsigned_abs();
    if b >= 0 {
        if off >= ncols {
            0
        } else {
            nrows.min(ncols - off)
        }
    } else if off >= nrows {
        0
    } else {
        (nrows - off).min(ncols)
    }
}

/// A matrix stored as a contiguous range of bands.
///
/// Implementors provide the declared limits and access to each band's
/// storage; element access, bandwidth scans, row views and validation are
/// derived from those.
pub trait Banded<T: Scalar>: MatrixRef<T> {
    /// Most negative band offset the layout can store. Never positive.
    fn lower_bandwidth_limit(&self) -> isize;

    /// Most positive band offset the layout can store. Never negative.
    fn upper_bandwidth_limit(&self) -> isize;

    /// Storage of band `b`. Empty when `b` is outside the declared limits.
    fn band(&self, b: isize) -> &[T];

    /// Mutable storage of band `b`. Empty when `b` is outside the declared
    /// limits.
    fn band_mut(&mut self, b: isize) -> &mut [T];

    /// Position of element `(row, col)` within its band.
    #[inline]
    fn band_position(&self, row: usize, col: usize) -> usize {
        row.min(col)
    }

    /// Expected length of band `b` for this shape.
    #[inline]
    fn band_length(&self, b: isize) -> usize {
        band_length(self.nrows(), self.ncols(), b)
    }

    /// Offset of the outermost nonzero band above the diagonal, or `0`.
    ///
    /// Scans from the declared limit inward.
    fn upper_bandwidth(&self) -> isize {
        let mut b = self.upper_bandwidth_limit();
        while b > 0 {
            if self.band(b).iter().any(|x| !x.is_zero()) {
                return b;
            }
            b -= 1;
        }
        0
    }

    /// Offset of the outermost nonzero band below the diagonal, or `0`.
    fn lower_bandwidth(&self) -> isize {
        let mut b = self.lower_bandwidth_limit();
        while b < 0 {
            if self.band(b).iter().any(|x| !x.is_zero()) {
                return b;
            }
            b += 1;
        }
        0
    }

    #[inline]
    fn in_band_range(&self, b: isize) -> bool {
        b >= self.lower_bandwidth_limit() && b <= self.upper_bandwidth_limit()
    }

    /// Element `(row, col)`: zero outside the stored band range.
    #[inline]
    fn band_at(&self, row: usize, col: usize) -> T {
        let b = col as isize - row as isize;
        if !self.in_band_range(b) {
            return T::zero();
        }
        self.band(b)[self.band_position(row, col)]
    }

    /// Write element `(row, col)`.
    ///
    /// Outside the stored band range, writing zero is a no-op and anything
    /// else fails with [`MatrixError::FixedZero`].
    fn set_band_at(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        let b = col as isize - row as isize;
        if !self.in_band_range(b) {
            if value.is_zero() {
                return Ok(());
            }
            return Err(MatrixError::FixedZero { row, col });
        }
        let pos = self.band_position(row, col);
        self.band_mut(b)[pos] = value;
        Ok(())
    }

    /// Borrowed view of row `row`.
    fn band_row(&self, row: usize) -> BandedRow<'_, T, Self>
    where
        Self: Sized,
    {
        BandedRow::new(self, row)
    }

    /// Mutable borrowed view of row `row`. Writes go to the band storage.
    fn band_row_mut(&mut self, row: usize) -> BandedRowMut<'_, T, Self>
    where
        Self: Sized,
    {
        BandedRowMut { owner: self, row, _marker: PhantomData }
    }

    /// Dot product of row `row` with `other`, touching only the columns
    /// inside the stored band range.
    fn row_dot<V: VectorRef<T> + ?Sized>(&self, row: usize, other: &V) -> T
    where
        Self: Sized,
    {
        self.band_row(row).dot(other)
    }

    /// Check the declared limits against the shape, and every band's length.
    ///
    /// Limit checks are skipped for an empty shape, which has no valid
    /// offsets at all.
    fn validate_bands(&self) -> Result<(), MatrixError> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let lower = self.lower_bandwidth_limit();
        let upper = self.upper_bandwidth_limit();
        if nrows > 0 && ncols > 0 {
            if lower <= -(nrows as isize) {
                return Err(MatrixError::InvalidLowerLimit { limit: lower, nrows });
            }
            if upper >= ncols as isize {
                return Err(MatrixError::InvalidUpperLimit { limit: upper, ncols });
            }
        }
        for b in lower..=upper {
            let expected = self.band_length(b);
            let got = self.band(b).len();
            if got != expected {
                return Err(MatrixError::InvalidBandLength { band: b, expected, got });
            }
        }
        Ok(())
    }
}

/// Row `row` of a banded matrix, synthesized on each access from the
/// owner's bands.
///
/// The band limits are read once when the view is created.
#[derive(Debug)]
pub struct BandedRow<'a, T, B: ?Sized> {
    owner: &'a B,
    row: usize,
    lower: isize,
    upper: isize,
    _marker: PhantomData<T>,
}

impl<T, B: ?Sized> Clone for BandedRow<'_, T, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, B: ?Sized> Copy for BandedRow<'_, T, B> {}

impl<'a, T: Scalar, B: Banded<T> + ?Sized> BandedRow<'a, T, B> {
    fn new(owner: &'a B, row: usize) -> Self {
        Self {
            owner,
            row,
            lower: owner.lower_bandwidth_limit(),
            upper: owner.upper_bandwidth_limit(),
            _marker: PhantomData,
        }
    }

    /// Index of the row within its matrix.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Columns that can hold a nonzero entry, as `start..end`.
    pub fn nonzero_range(&self) -> core::ops::Range<usize> {
        let row = self.row as isize;
        let start = (row + self.lower).max(0);
        let end = (row + self.upper + 1).min(self.owner.ncols() as isize);
        if end <= start {
            0..0
        } else {
            start as usize..end as usize
        }
    }
}

impl<T: Scalar, B: Banded<T> + ?Sized> VectorRef<T> for BandedRow<'_, T, B> {
    #[inline]
    fn len(&self) -> usize {
        self.owner.ncols()
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        let b = i as isize - self.row as isize;
        if b < self.lower || b > self.upper {
            return T::zero();
        }
        self.owner.band(b)[self.owner.band_position(self.row, i)]
    }

    fn dot<V: VectorRef<T> + ?Sized>(&self, other: &V) -> T {
        assert_eq!(self.len(), other.len(), "vector length mismatch");
        let mut sum = T::zero();
        for i in self.nonzero_range() {
            sum = sum + self.at(i) * other.at(i);
        }
        sum
    }

    fn is_zero(&self) -> bool {
        self.nonzero_range().all(|i| self.at(i).is_zero())
    }
}

/// Mutable row view of a banded matrix.
#[derive(Debug)]
pub struct BandedRowMut<'a, T, B: ?Sized> {
    owner: &'a mut B,
    row: usize,
    _marker: PhantomData<T>,
}

impl<T: Scalar, B: Banded<T> + ?Sized> BandedRowMut<'_, T, B> {
    /// Reborrow as a read-only row.
    pub fn as_row(&self) -> BandedRow<'_, T, B> {
        BandedRow::new(&*self.owner, self.row)
    }
}

impl<T: Scalar, B: Banded<T> + ?Sized> VectorRef<T> for BandedRowMut<'_, T, B> {
    #[inline]
    fn len(&self) -> usize {
        self.owner.ncols()
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.owner.band_at(self.row, i)
    }

    fn dot<V: VectorRef<T> + ?Sized>(&self, other: &V) -> T {
        self.as_row().dot(other)
    }
}

impl<T: Scalar, B: Banded<T> + ?Sized> VectorMut<T> for BandedRowMut<'_, T, B> {
    #[inline]
    fn set_at(&mut self, i: usize, value: T) -> Result<(), MatrixError> {
        self.owner.set_band_at(self.row, i, value)
    }
}
