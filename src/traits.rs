use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::error::MatrixError;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by the decompositions (`sqrt`, `abs`, `epsilon`, finiteness checks).
pub trait FloatScalar: Scalar + Float {}

impl<T: Scalar + Float> FloatScalar for T {}

#[inline]
pub(crate) fn check_index(
    nrows: usize,
    ncols: usize,
    row: usize,
    col: usize,
) -> Result<(), MatrixError> {
    if row < nrows && col < ncols {
        Ok(())
    } else {
        Err(MatrixError::IndexOutOfBounds {
            row,
            col,
            nrows,
            ncols,
        })
    }
}

#[inline]
pub(crate) fn check_vector_index(len: usize, index: usize) -> Result<(), MatrixError> {
    if index < len {
        Ok(())
    } else {
        Err(MatrixError::VectorIndexOutOfBounds { index, len })
    }
}

/// Read access to a matrix-like value.
///
/// Implemented by the dense [`DynMatrix`] and by every structured view
/// (permutation, banded). Elements are returned by value because structured
/// representations synthesize most of them.
///
/// The shape is fixed for the lifetime of the value, and [`get`](Self::get)
/// always agrees with [`at`](Self::at) for in-range coordinates.
pub trait MatrixRef<T: Scalar> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;

    /// Element at `(row, col)` without checking the coordinates against the
    /// logical shape. Callers on hot paths guarantee them; out-of-range
    /// coordinates give an unspecified value or panic.
    fn at(&self, row: usize, col: usize) -> T;

    /// `(nrows, ncols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[inline]
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Bounds-checked element access.
    #[inline]
    fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        check_index(self.nrows(), self.ncols(), row, col)?;
        Ok(self.at(row, col))
    }

    /// Whether every element can be written independently.
    fn is_fully_mutable(&self) -> bool {
        false
    }

    /// Direct access to row `row` as a contiguous slice, if the
    /// representation stores it that way.
    ///
    /// Used once at an operation boundary to pick a dense fast path.
    #[inline]
    fn dense_row(&self, _row: usize) -> Option<&[T]> {
        None
    }

    /// Check every structural invariant of the representation.
    fn validate(&self) -> Result<(), MatrixError> {
        Ok(())
    }

    /// Materialize into a dense matrix.
    fn to_dense(&self) -> DynMatrix<T> {
        DynMatrix::from_fn(self.nrows(), self.ncols(), |i, j| self.at(i, j))
    }
}

/// Write access to a matrix-like value.
pub trait MatrixMut<T: Scalar>: MatrixRef<T> {
    /// Write `value` at `(row, col)` without checking the coordinates.
    ///
    /// Representations that do not store the element refuse the write with
    /// [`MatrixError::Unsupported`] or [`MatrixError::FixedZero`].
    fn set_at(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError>;

    /// Bounds-checked write.
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        check_index(self.nrows(), self.ncols(), row, col)?;
        self.set_at(row, col, value)
    }
}

/// Read access to a vector-like value (dense vectors, one-hot axis vectors,
/// rows of structured matrices).
pub trait VectorRef<T: Scalar> {
    fn len(&self) -> usize;

    /// Element `i` without a bounds check against [`len`](Self::len).
    fn at(&self, i: usize) -> T;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds-checked element access.
    #[inline]
    fn get(&self, i: usize) -> Result<T, MatrixError> {
        check_vector_index(self.len(), i)?;
        Ok(self.at(i))
    }

    fn is_fully_mutable(&self) -> bool {
        false
    }

    /// The elements as a contiguous slice, if stored that way.
    #[inline]
    fn dense_slice(&self) -> Option<&[T]> {
        None
    }

    /// Dot product. Panics if the lengths differ.
    fn dot<V: VectorRef<T> + ?Sized>(&self, other: &V) -> T {
        assert_eq!(self.len(), other.len(), "vector length mismatch");
        if let (Some(a), Some(b)) = (self.dense_slice(), other.dense_slice()) {
            return a
                .iter()
                .zip(b.iter())
                .fold(T::zero(), |acc, (&x, &y)| acc + x * y);
        }
        let mut sum = T::zero();
        for i in 0..self.len() {
            sum = sum + self.at(i) * other.at(i);
        }
        sum
    }

    /// Whether every element is zero.
    fn is_zero(&self) -> bool {
        match self.dense_slice() {
            Some(s) => s.iter().all(|x| x.is_zero()),
            None => (0..self.len()).all(|i| self.at(i).is_zero()),
        }
    }

    /// Copy into an independent dense vector.
    fn to_dyn_vector(&self) -> DynVector<T> {
        DynVector::from_fn(self.len(), |i| self.at(i))
    }
}

/// Write access to a vector-like value.
pub trait VectorMut<T: Scalar>: VectorRef<T> {
    /// Write element `i` without a bounds check.
    fn set_at(&mut self, i: usize, value: T) -> Result<(), MatrixError>;

    /// Bounds-checked write.
    #[inline]
    fn set(&mut self, i: usize, value: T) -> Result<(), MatrixError> {
        check_vector_index(self.len(), i)?;
        self.set_at(i, value)
    }

    #[inline]
    fn dense_slice_mut(&mut self) -> Option<&mut [T]> {
        None
    }
}

impl<T: Scalar> VectorRef<T> for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self[i]
    }

    fn is_fully_mutable(&self) -> bool {
        true
    }

    #[inline]
    fn dense_slice(&self) -> Option<&[T]> {
        Some(self)
    }
}

impl<T: Scalar> VectorMut<T> for [T] {
    #[inline]
    fn set_at(&mut self, i: usize, value: T) -> Result<(), MatrixError> {
        self[i] = value;
        Ok(())
    }

    #[inline]
    fn dense_slice_mut(&mut self) -> Option<&mut [T]> {
        Some(self)
    }
}
