use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::MatrixError;
use crate::traits::{Scalar, VectorMut, VectorRef};

use super::DynMatrix;

/// Dynamically-sized vector (wraps a 1×N `DynMatrix`).
///
/// Enforces the single-row constraint and provides single-index access `v[i]`.
///
/// # Examples
///
/// ```
/// use matview::{DynVector, VectorRef};
///
/// let v = DynVector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert!((v.dot(&v) - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    pub(crate) inner: DynMatrix<T>,
}

impl<T> DynVector<T> {
    /// The zero-length vector. No allocation; every empty vector is equal
    /// to this value.
    ///
    /// ```
    /// use matview::{DynVector, VectorRef};
    /// const EMPTY: DynVector<f64> = DynVector::empty();
    /// assert!(EMPTY.is_empty());
    /// assert_eq!(EMPTY, DynVector::from_slice(&[]));
    /// ```
    pub const fn empty() -> Self {
        Self {
            inner: DynMatrix {
                data: Vec::new(),
                nrows: 1,
                ncols: 0,
            },
        }
    }

    /// Create a vector by calling `f(i)` for each element.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize) -> T) -> Self {
        Self {
            inner: DynMatrix::from_fn(1, n, |_, j| f(j)),
        }
    }
}

impl<T: Scalar> DynVector<T> {
    /// Create a vector from a flat slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            inner: DynMatrix::from_rows(1, data.len(), data),
        }
    }

    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        let n = data.len();
        Self {
            inner: DynMatrix::from_vec(1, n, data),
        }
    }

    /// Create a zero vector of length `n`.
    pub fn zeros(n: usize, _zero: T) -> Self {
        Self {
            inner: DynMatrix::zeros(1, n, T::zero()),
        }
    }

    /// View the vector data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// View the vector data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner.data[i]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.inner.data[i]
    }
}

// ── VectorRef / VectorMut ───────────────────────────────────────────

impl<T: Scalar> VectorRef<T> for DynVector<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.ncols
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.inner.data[i]
    }

    fn is_fully_mutable(&self) -> bool {
        true
    }

    #[inline]
    fn dense_slice(&self) -> Option<&[T]> {
        Some(&self.inner.data)
    }

    fn to_dyn_vector(&self) -> DynVector<T> {
        self.clone()
    }
}

impl<T: Scalar> VectorMut<T> for DynVector<T> {
    #[inline]
    fn set_at(&mut self, i: usize, value: T) -> Result<(), MatrixError> {
        self.inner.data[i] = value;
        Ok(())
    }

    #[inline]
    fn dense_slice_mut(&mut self) -> Option<&mut [T]> {
        Some(&mut self.inner.data)
    }
}

impl<T: Scalar> From<DynVector<T>> for DynMatrix<T> {
    fn from(v: DynVector<T>) -> Self {
        v.inner
    }
}
