use crate::traits::{FloatScalar, Scalar};

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Squared Frobenius norm (sum of all elements squared).
    pub fn frobenius_norm_squared(&self) -> T {
        let mut sum = T::zero();
        for &x in &self.data {
            sum = sum + x * x;
        }
        sum
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// Frobenius norm.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.frobenius_norm_squared().sqrt()
    }

    /// Largest element magnitude, or zero for an empty matrix.
    ///
    /// NaN elements propagate.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -7.0, 3.0, 4.0]);
    /// assert_eq!(m.element_max_abs(), 7.0);
    /// ```
    pub fn element_max_abs(&self) -> T {
        let mut max = T::zero();
        for &x in &self.data {
            let a = x.abs();
            if a > max || a.is_nan() {
                max = a;
            }
        }
        max
    }
}
