use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Copy the `rows x cols` sub-matrix starting at `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// let m = DynMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let b = m.block(1, 1, 2, 2);
    /// assert_eq!(b[(0, 0)], 4.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// ```
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Self {
        assert!(
            i + rows <= self.nrows && j + cols <= self.ncols,
            "block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i,
            j,
            rows,
            cols,
            self.nrows,
            self.ncols,
        );
        DynMatrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)])
    }

    /// Overwrite the sub-matrix starting at `(i, j)` with `src`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn set_block(&mut self, i: usize, j: usize, src: &DynMatrix<T>) {
        assert!(
            i + src.nrows <= self.nrows && j + src.ncols <= self.ncols,
            "set_block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i,
            j,
            src.nrows,
            src.ncols,
            self.nrows,
            self.ncols,
        );
        for r in 0..src.nrows {
            let dst = (i + r) * self.ncols + j;
            self.data[dst..dst + src.ncols].copy_from_slice(src.row_slice(r));
        }
    }

    /// The first `n` columns.
    pub fn left_cols(&self, n: usize) -> Self {
        self.block(0, 0, self.nrows, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4x5() -> DynMatrix<i32> {
        DynMatrix::from_fn(4, 5, |i, j| (i * 5 + j) as i32)
    }

    #[test]
    fn block_extract() {
        let m = mat4x5();
        let b = m.block(1, 1, 2, 3);
        assert_eq!(b.as_slice(), &[6, 7, 8, 11, 12, 13]);
        assert_eq!(m.block(0, 0, 4, 5), m);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn block_out_of_bounds() {
        let m = mat4x5();
        let _ = m.block(3, 3, 2, 3);
    }

    #[test]
    fn set_block_writes_window_only() {
        let mut m = DynMatrix::zeros(4, 4, 0i32);
        let patch = DynMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        m.set_block(1, 1, &patch);
        assert_eq!(m.row_slice(0), &[0, 0, 0, 0]);
        assert_eq!(m.row_slice(1), &[0, 1, 2, 3]);
        assert_eq!(m.row_slice(2), &[0, 4, 5, 6]);
        assert_eq!(m.row_slice(3), &[0, 0, 0, 0]);
    }

    #[test]
    fn left_cols() {
        let m = mat4x5();
        let left = m.left_cols(2);
        assert_eq!(left.shape(), (4, 2));
        assert_eq!(left[(3, 1)], 16);
    }
}
