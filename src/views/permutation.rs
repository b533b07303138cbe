use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::dynmatrix::DynMatrix;
use crate::error::MatrixError;
use crate::traits::{MatrixMut, MatrixRef, Scalar, VectorMut, VectorRef};

use super::AxisVector;

/// Square permutation matrix stored as an index array.
///
/// `perm[i]` is the column holding the single one in row `i`, so applying
/// the matrix to a vector gathers `dest[i] = source[perm[i]]`. Entries can't
/// be written individually; the matrix changes only through
/// [`swap_rows`](Self::swap_rows) and [`swap_columns`](Self::swap_columns).
///
/// Construction does not check that the indices form a permutation. Call
/// [`validate`](MatrixRef::validate) for that.
///
/// ```
/// use matview::{DynMatrix, PermutationMatrix};
///
/// let p = PermutationMatrix::<f64>::new(&[2, 0, 1]);
/// let a = DynMatrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let pa = p.inner_product(&a);
/// assert_eq!(pa.as_slice(), &[5.0, 6.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationMatrix<T> {
    perm: Vec<usize>,
    size: usize,
    _marker: PhantomData<T>,
}

impl<T> PermutationMatrix<T> {
    /// Build from a copy of `indices`.
    pub fn new(indices: &[usize]) -> Self {
        Self::from_vec(indices.to_vec())
    }

    /// Build from an owned index vector.
    pub fn from_vec(perm: Vec<usize>) -> Self {
        let size = perm.len();
        Self {
            perm,
            size,
            _marker: PhantomData,
        }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from_vec((0..n).collect())
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The index array.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.perm
    }

    /// Row whose one sits in column `col`.
    pub fn find(&self, col: usize) -> Option<usize> {
        self.perm.iter().position(|&c| c == col)
    }

    /// Row `i` as a one-hot vector.
    pub fn row(&self, i: usize) -> AxisVector<T> {
        AxisVector::new(self.perm[i], self.size)
    }

    /// Column `j` as a one-hot vector. O(n) reverse lookup.
    ///
    /// Panics if no row maps to `j`, which only happens when the index
    /// array is not a permutation.
    pub fn column(&self, j: usize) -> AxisVector<T> {
        match self.find(j) {
            Some(i) => AxisVector::new(i, self.size),
            None => panic!("column {} has no entry; indices are not a permutation", j),
        }
    }

    /// Swap rows `i` and `j`.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
    }

    /// Swap columns `i` and `j`.
    pub fn swap_columns(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let a = self.find(i);
        let b = self.find(j);
        match (a, b) {
            (Some(a), Some(b)) => self.perm.swap(a, b),
            _ => panic!("columns {} and {} must both be present in the permutation", i, j),
        }
    }

    /// The inverse (equal to the transpose).
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.perm.len()];
        for (i, &p) in self.perm.iter().enumerate() {
            inv[p] = i;
        }
        Self::from_vec(inv)
    }
}

impl<T: Scalar> PermutationMatrix<T> {
    /// `dest[i] = source[perm[i]]`.
    ///
    /// Panics if the lengths don't match the matrix size. Errors only when
    /// `dest` refuses one of the writes.
    pub fn transform<S, D>(&self, source: &S, dest: &mut D) -> Result<(), MatrixError>
    where
        S: VectorRef<T> + ?Sized,
        D: VectorMut<T> + ?Sized,
    {
        assert_eq!(source.len(), self.size, "source length must equal column count");
        assert_eq!(dest.len(), self.size, "destination length must equal row count");

        if let Some(src) = source.dense_slice() {
            if let Some(dst) = dest.dense_slice_mut() {
                for (d, &p) in dst.iter_mut().zip(&self.perm) {
                    *d = src[p];
                }
                return Ok(());
            }
        }
        for (i, &p) in self.perm.iter().enumerate() {
            dest.set_at(i, source.at(p))?;
        }
        Ok(())
    }

    /// `P · A` as a row gather: row `i` of the result is row `perm[i]` of `a`.
    ///
    /// Panics if `a.nrows() != self.size()`.
    pub fn inner_product<M: MatrixRef<T> + ?Sized>(&self, a: &M) -> DynMatrix<T> {
        let mut out = DynMatrix::zeros(0, 0, T::zero());
        self.inner_product_into(a, &mut out);
        out
    }

    /// [`inner_product`](Self::inner_product) into a reused buffer.
    pub fn inner_product_into<M: MatrixRef<T> + ?Sized>(&self, a: &M, out: &mut DynMatrix<T>) {
        assert_eq!(
            a.nrows(),
            self.size,
            "dimension mismatch: {}x{} permutation * {}x{}",
            self.size,
            self.size,
            a.nrows(),
            a.ncols(),
        );
        let cols = a.ncols();
        out.reshape(self.size, cols);
        for (i, &p) in self.perm.iter().enumerate() {
            let dst = out.row_slice_mut(i);
            match a.dense_row(p) {
                Some(src) => dst.copy_from_slice(src),
                None => {
                    for (j, d) in dst.iter_mut().enumerate() {
                        *d = a.at(p, j);
                    }
                }
            }
        }
    }

    /// `A · Pᵀ` as a column gather: column `c` of the result is column
    /// `perm[c]` of `a`.
    ///
    /// Panics if `a.ncols() != self.size()`.
    pub fn gather_columns<M: MatrixRef<T> + ?Sized>(&self, a: &M) -> DynMatrix<T> {
        let mut out = DynMatrix::zeros(0, 0, T::zero());
        self.gather_columns_into(a, &mut out);
        out
    }

    /// [`gather_columns`](Self::gather_columns) into a reused buffer.
    pub fn gather_columns_into<M: MatrixRef<T> + ?Sized>(&self, a: &M, out: &mut DynMatrix<T>) {
        assert_eq!(
            a.ncols(),
            self.size,
            "dimension mismatch: {}x{} * {}x{} permutation",
            a.nrows(),
            a.ncols(),
            self.size,
            self.size,
        );
        let rows = a.nrows();
        out.reshape(rows, self.size);
        for r in 0..rows {
            let dst = out.row_slice_mut(r);
            match a.dense_row(r) {
                Some(src) => {
                    for (d, &p) in dst.iter_mut().zip(&self.perm) {
                        *d = src[p];
                    }
                }
                None => {
                    for (d, &p) in dst.iter_mut().zip(&self.perm) {
                        *d = a.at(r, p);
                    }
                }
            }
        }
    }
}

impl<T: Scalar> MatrixRef<T> for PermutationMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.size
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.size
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        if self.perm[row] == col {
            T::one()
        } else {
            T::zero()
        }
    }

    fn validate(&self) -> Result<(), MatrixError> {
        if self.size != self.perm.len() {
            return Err(MatrixError::SizeMismatch {
                size: self.size,
                len: self.perm.len(),
            });
        }
        let mut seen = vec![false; self.size];
        for (index, &value) in self.perm.iter().enumerate() {
            if value >= self.size || seen[value] {
                return Err(MatrixError::NotAPermutation { index, value });
            }
            seen[value] = true;
        }
        Ok(())
    }

    fn to_dense(&self) -> DynMatrix<T> {
        let mut out = DynMatrix::zeros(self.size, self.size, T::zero());
        for (i, &p) in self.perm.iter().enumerate() {
            out[(i, p)] = T::one();
        }
        out
    }
}

impl<T: Scalar> MatrixMut<T> for PermutationMatrix<T> {
    fn set_at(&mut self, _row: usize, _col: usize, _value: T) -> Result<(), MatrixError> {
        Err(MatrixError::Unsupported(
            "can't arbitrarily mutate a permutation matrix",
        ))
    }
}
