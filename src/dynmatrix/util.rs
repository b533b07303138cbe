use crate::traits::Scalar;

use super::vector::DynVector;
use super::DynMatrix;

// ── Row / Column manipulation ───────────────────────────────────────

impl<T> DynMatrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            for i in 0..self.nrows {
                let row = i * self.ncols;
                self.data.swap(row + a, row + b);
            }
        }
    }
}

// ── Row / Column access ─────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Copy row `i` into a `DynVector`.
    pub fn row(&self, i: usize) -> DynVector<T> {
        DynVector::from_slice(self.row_slice(i))
    }

    /// Copy column `j` into a `DynVector`.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c[0], 2.0);
    /// assert_eq!(c[1], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> DynVector<T> {
        DynVector::from_fn(self.nrows, |i| self[(i, j)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_twice_is_identity() {
        let orig = DynMatrix::from_fn(3, 4, |i, j| (i * 4 + j) as f64);
        let mut m = orig.clone();
        m.swap_rows(0, 2);
        assert_eq!(m.row_slice(0), orig.row_slice(2));
        m.swap_rows(0, 2);
        assert_eq!(m, orig);
        m.swap_cols(1, 3);
        assert_eq!(m[(2, 1)], orig[(2, 3)]);
        m.swap_cols(3, 1);
        assert_eq!(m, orig);
    }

    #[test]
    fn row_col() {
        let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1).as_slice(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.col(2).as_slice(), &[3.0, 6.0]);
    }
}
