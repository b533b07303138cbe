use crate::linalg::{
    BidiagonalDecomposition, BidiagonalRow, HouseholderQrp, LinalgError, PivotedQr,
    TallBidiagonal,
};
use crate::traits::FloatScalar;

use super::DynMatrix;

impl<T: FloatScalar> DynMatrix<T> {
    /// Pivoted QR decomposition `A · P = Q · R` with a zero pivot threshold.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// use matview::linalg::PivotedQr;
    ///
    /// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// let qrp = a.pivoted_qr().unwrap();
    /// assert_eq!(qrp.rank(), 2);
    /// assert_eq!(qrp.pivots(), &[1, 0]);
    /// ```
    pub fn pivoted_qr(&self) -> Result<HouseholderQrp<T>, LinalgError> {
        let mut qrp = HouseholderQrp::new();
        qrp.decompose(self)?;
        Ok(qrp)
    }

    /// Bidiagonal decomposition `A = U · B · Vᵀ` by alternating Householder
    /// reflections.
    ///
    /// ```
    /// use matview::DynMatrix;
    /// use matview::linalg::BidiagonalDecomposition;
    ///
    /// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 2.0]);
    /// let bd = a.bidiagonal().unwrap();
    /// let (d, e) = bd.diagonal();
    /// assert_eq!((d.len(), e.len()), (2, 1));
    /// assert!((d[0].abs() - 5.0).abs() < 1e-12);
    /// ```
    pub fn bidiagonal(&self) -> Result<BidiagonalRow<T>, LinalgError> {
        let mut bd = BidiagonalRow::new();
        bd.decompose(self)?;
        Ok(bd)
    }

    /// Bidiagonal decomposition through a pivoted QR first; the cheaper
    /// route when [`prefers_tall`](crate::linalg::prefers_tall) holds.
    pub fn bidiagonal_tall(&self) -> Result<TallBidiagonal<T>, LinalgError> {
        let mut bd = TallBidiagonal::new();
        bd.decompose(self)?;
        Ok(bd)
    }
}
