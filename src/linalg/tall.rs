use tracing::debug;

use crate::dynmatrix::DynMatrix;
use crate::linalg::{
    BidiagonalDecomposition, BidiagonalRow, DecompositionState, HouseholderQrp, LinalgError,
    PivotedQr,
};
use crate::traits::{FloatScalar, MatrixRef};

/// Settings for [`TallBidiagonal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TallBidiagonalSettings<T> {
    /// Pivot threshold relative to the largest input magnitude. Columns of
    /// the pivoted QR whose remaining norm is at most
    /// `max|a_ij| * threshold_scale` are treated as negligible.
    pub threshold_scale: T,
}

impl<T: FloatScalar> Default for TallBidiagonalSettings<T> {
    fn default() -> Self {
        Self {
            threshold_scale: T::epsilon(),
        }
    }
}

/// Whether QR-first bidiagonalization is expected to be cheaper than
/// working on the full matrix: true once `nrows / ncols > 5/3`.
///
/// ```
/// use matview::linalg::prefers_tall;
/// assert!(prefers_tall(100, 10));
/// assert!(!prefers_tall(5, 3));
/// assert!(prefers_tall(6, 3));
/// ```
pub fn prefers_tall(nrows: usize, ncols: usize) -> bool {
    3 * nrows > 5 * ncols
}

fn max_abs<T: FloatScalar, M: MatrixRef<T> + ?Sized>(a: &M) -> T {
    let mut max = T::zero();
    for i in 0..a.nrows() {
        match a.dense_row(i) {
            Some(row) => {
                for &x in row {
                    max = max.max(x.abs());
                }
            }
            None => {
                for j in 0..a.ncols() {
                    max = max.max(a.at(i, j).abs());
                }
            }
        }
    }
    max
}

/// Bidiagonalization of a tall matrix by way of a pivoted QR.
///
/// For `m ≫ n` it is cheaper to factor `A · P = Q · R` first and
/// bidiagonalize the small `min(m,n) x n` matrix `R · Pᵀ = U₁ · B · Vᵀ`.
/// Then `A = (Q₁ · U₁) · B · Vᵀ`, and `Q` is only ever multiplied against
/// the `min`-wide `U₁`. See [`prefers_tall`] for the break-even shape.
///
/// Both stages are pluggable through the [`PivotedQr`] and
/// [`BidiagonalDecomposition`] traits.
///
/// # Example
///
/// ```
/// use matview::DynMatrix;
/// use matview::linalg::{BidiagonalDecomposition, TallBidiagonal};
///
/// let a = DynMatrix::from_rows(5, 2, &[1.0_f64, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 2.0]);
/// let mut bd = TallBidiagonal::new();
/// bd.decompose(&a).unwrap();
///
/// let u = bd.u(false, false);
/// assert_eq!(u.shape(), (5, 5));
/// assert_eq!(bd.b(true).shape(), (2, 2));
///
/// let usv = &(&u * &bd.b(false)) * &bd.v(true, false);
/// for i in 0..5 {
///     for j in 0..2 {
///         assert!((usv[(i, j)] - a[(i, j)]).abs() < 1e-12);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TallBidiagonal<T, Q = HouseholderQrp<T>, B = BidiagonalRow<T>> {
    qrp: Q,
    bidiag: B,
    work: DynMatrix<T>,
    settings: TallBidiagonalSettings<T>,
    m: usize,
    n: usize,
    min: usize,
    state: DecompositionState,
}

impl<T: FloatScalar> Default for TallBidiagonal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatScalar> TallBidiagonal<T> {
    /// Householder services with default settings.
    pub fn new() -> Self {
        Self::with_settings(TallBidiagonalSettings::default())
    }

    /// Householder services with the given settings.
    pub fn with_settings(settings: TallBidiagonalSettings<T>) -> Self {
        Self::with_services(HouseholderQrp::new(), BidiagonalRow::new(), settings)
    }
}

impl<T, Q, B> TallBidiagonal<T, Q, B>
where
    T: FloatScalar,
    Q: PivotedQr<T>,
    B: BidiagonalDecomposition<T>,
{
    /// Build on caller-supplied stages.
    pub fn with_services(qrp: Q, bidiag: B, settings: TallBidiagonalSettings<T>) -> Self {
        Self {
            qrp,
            bidiag,
            work: DynMatrix::zeros(0, 0, T::zero()),
            settings,
            m: 0,
            n: 0,
            min: 0,
            state: DecompositionState::Undecomposed,
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &TallBidiagonalSettings<T> {
        &self.settings
    }

    /// Where the last `decompose` left this engine.
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    /// The pivoted QR stage.
    pub fn pivoted_qr(&self) -> &Q {
        &self.qrp
    }

    /// The bidiagonal stage, run on `R · Pᵀ`.
    pub fn row_bidiagonal(&self) -> &B {
        &self.bidiag
    }

    fn assert_decomposed(&self) {
        assert!(
            self.state == DecompositionState::Decomposed,
            "tall bidiagonalization has not succeeded (state: {:?})",
            self.state,
        );
    }
}

impl<T, Q, B> BidiagonalDecomposition<T> for TallBidiagonal<T, Q, B>
where
    T: FloatScalar,
    Q: PivotedQr<T>,
    B: BidiagonalDecomposition<T>,
{
    fn decompose<M: MatrixRef<T> + ?Sized>(&mut self, a: &M) -> Result<(), LinalgError> {
        let (m, n) = a.shape();
        self.m = m;
        self.n = n;
        self.min = m.min(n);
        self.state = DecompositionState::Failed;

        let threshold = max_abs(a) * self.settings.threshold_scale;
        debug!("tall bidiagonalization of {}x{}, pivot threshold {:?}", m, n, threshold);

        self.qrp.set_singular_threshold(threshold);
        if let Err(e) = self.qrp.decompose(a) {
            debug!("tall bidiagonalization failed in pivoted QR: {}", e);
            return Err(e);
        }

        // B = R · Pᵀ puts the columns back in their original order
        let r = self.qrp.r(true);
        self.qrp.pivot_matrix().gather_columns_into(&r, &mut self.work);

        if let Err(e) = self.bidiag.decompose(&self.work) {
            debug!("tall bidiagonalization failed in row bidiagonalization: {}", e);
            return Err(e);
        }

        self.state = DecompositionState::Decomposed;
        Ok(())
    }

    fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// `Q₁ · U₁` compact; `[Q₁ · U₁  Q₂]` full.
    fn u(&self, transpose: bool, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        let u1 = self.bidiag.u(false, true);
        let u = if compact {
            &self.qrp.q(true) * &u1
        } else {
            let mut q = self.qrp.q(false);
            let q1u1 = &q.left_cols(self.min) * &u1;
            q.set_block(0, 0, &q1u1);
            q
        };
        if transpose {
            u.transpose()
        } else {
            u
        }
    }

    fn v(&self, transpose: bool, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        self.bidiag.v(transpose, compact)
    }

    fn diagonal(&self) -> (&[T], &[T]) {
        self.assert_decomposed();
        self.bidiag.diagonal()
    }

    fn input_modified(&self) -> bool {
        self.qrp.input_modified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{Banded, PermutationMatrix};
    use alloc::format;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn assert_mat_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64, what: &str) {
        assert_eq!(a.shape(), b.shape(), "{} shape", what);
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_near(a[(i, j)], b[(i, j)], tol, &format!("{}[({},{})]", what, i, j));
            }
        }
    }

    fn reconstruct(bd: &impl BidiagonalDecomposition<f64>, compact: bool) -> DynMatrix<f64> {
        &(&bd.u(false, compact) * &bd.b(compact)) * &bd.v(true, compact)
    }

    fn example_5x2() -> DynMatrix<f64> {
        DynMatrix::from_rows(5, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 2.0])
    }

    #[test]
    fn five_by_two() {
        let a = example_5x2();
        let mut bd = TallBidiagonal::new();
        bd.decompose(&a).unwrap();
        assert_eq!(bd.state(), DecompositionState::Decomposed);
        assert_eq!(bd.shape(), (5, 2));

        let b = bd.b(true);
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b[(1, 0)], 0.0);

        let u = bd.u(false, false);
        assert_eq!(u.shape(), (5, 5));
        assert_mat_near(&(&u.transpose() * &u), &DynMatrix::eye(5, 0.0), TOL, "UᵀU");
        assert_eq!(bd.u(false, true).shape(), (5, 2));

        let tol = TOL * a.element_max_abs();
        assert_mat_near(&reconstruct(&bd, true), &a, tol, "compact");
        assert_mat_near(&reconstruct(&bd, false), &a, tol, "full");
    }

    #[test]
    fn trailing_columns_of_full_u_are_q2() {
        let a = example_5x2();
        let mut bd = TallBidiagonal::new();
        bd.decompose(&a).unwrap();
        let q = bd.pivoted_qr().q(false);
        let u = bd.u(false, false);
        assert_eq!(u.block(0, 2, 5, 3), q.block(0, 2, 5, 3));
        assert_eq!(bd.u(true, false), u.transpose());
    }

    #[test]
    fn diagonal_matches_b() {
        let a = DynMatrix::from_fn(9, 4, |i, j| ((i * 5 + j * 3) % 7) as f64 - 3.0);
        let mut bd = TallBidiagonal::new();
        bd.decompose(&a).unwrap();
        let (d, e) = bd.diagonal();
        assert_eq!((d.len(), e.len()), (4, 3));
        let b = bd.b(true);
        for k in 0..4 {
            assert_eq!(b[(k, k)], d[k]);
        }
        for k in 0..3 {
            assert_eq!(b[(k, k + 1)], e[k]);
        }
        let structured = bd.bidiagonal();
        assert!(structured.validate().is_ok());
        assert_eq!(structured.lower_bandwidth(), 0);

        // orthogonal factors preserve the Frobenius norm
        assert_near(b.frobenius_norm(), a.frobenius_norm(), TOL, "‖B‖ = ‖A‖");
        assert_mat_near(&reconstruct(&bd, true), &a, TOL, "compact");
    }

    #[test]
    fn rank_deficient() {
        // third column = 2 * first
        let a = DynMatrix::from_fn(8, 3, |i, j| match j {
            0 => (i + 1) as f64,
            1 => ((i * i) % 5) as f64,
            _ => 2.0 * (i + 1) as f64,
        });
        let mut bd = TallBidiagonal::with_settings(TallBidiagonalSettings {
            threshold_scale: 1e-10,
        });
        bd.decompose(&a).unwrap();
        assert_eq!(bd.pivoted_qr().rank(), 2);
        assert_mat_near(&reconstruct(&bd, false), &a, 1e-8, "full");
        let (d, _) = bd.diagonal();
        assert!(d[2].abs() < 1e-8);
    }

    #[test]
    fn wide_input() {
        let a = DynMatrix::from_fn(2, 4, |i, j| (i * 4 + j) as f64 + if i == j { 1.0 } else { 0.0 });
        let mut bd = TallBidiagonal::new();
        bd.decompose(&a).unwrap();
        assert_eq!(bd.b(true).shape(), (2, 3));
        assert_eq!(bd.v(false, true).shape(), (4, 3));
        assert_mat_near(&reconstruct(&bd, true), &a, TOL, "compact");
        assert_mat_near(&reconstruct(&bd, false), &a, TOL, "full");
    }

    #[test]
    fn reuse_across_shapes() {
        let mut bd = TallBidiagonal::new();
        let big = DynMatrix::from_fn(12, 3, |i, j| (i as f64 * 0.3 + j as f64).cos());
        bd.decompose(&big).unwrap();
        assert_mat_near(&reconstruct(&bd, true), &big, TOL, "big");
        let small = example_5x2();
        bd.decompose(&small).unwrap();
        assert_mat_near(&reconstruct(&bd, true), &small, TOL, "small");
        assert!(!bd.input_modified());
    }

    #[test]
    fn zero_matrix() {
        let a = DynMatrix::zeros(4, 2, 0.0_f64);
        let mut bd = TallBidiagonal::new();
        bd.decompose(&a).unwrap();
        assert_eq!(bd.pivoted_qr().rank(), 0);
        assert_mat_near(&bd.b(false), &a, TOL, "B");
    }

    #[test]
    fn structured_input() {
        let p = PermutationMatrix::<f64>::new(&[3, 1, 0, 2]);
        let mut bd = TallBidiagonal::new();
        bd.decompose(&p).unwrap();
        assert_mat_near(&reconstruct(&bd, true), &p.to_dense(), TOL, "P");
    }

    /// Pivoted QR stage that always breaks down.
    struct BrokenQr;

    impl PivotedQr<f64> for BrokenQr {
        fn set_singular_threshold(&mut self, _threshold: f64) {}

        fn decompose<M: MatrixRef<f64> + ?Sized>(&mut self, _a: &M) -> Result<(), LinalgError> {
            Err(LinalgError::Breakdown)
        }

        fn r(&self, _compact: bool) -> DynMatrix<f64> {
            unreachable!()
        }

        fn q(&self, _compact: bool) -> DynMatrix<f64> {
            unreachable!()
        }

        fn pivot_matrix(&self) -> PermutationMatrix<f64> {
            unreachable!()
        }

        fn input_modified(&self) -> bool {
            true
        }
    }

    #[test]
    fn qr_failure_is_fatal() {
        let mut bd = TallBidiagonal::with_services(
            BrokenQr,
            BidiagonalRow::new(),
            TallBidiagonalSettings::default(),
        );
        assert_eq!(bd.decompose(&example_5x2()), Err(LinalgError::Breakdown));
        assert_eq!(bd.state(), DecompositionState::Failed);
        assert!(bd.input_modified());
        assert_eq!(bd.row_bidiagonal().state(), DecompositionState::Undecomposed);
    }

    /// Row bidiagonal stage that always breaks down.
    struct BrokenBidiagonal;

    impl BidiagonalDecomposition<f64> for BrokenBidiagonal {
        fn decompose<M: MatrixRef<f64> + ?Sized>(&mut self, _a: &M) -> Result<(), LinalgError> {
            Err(LinalgError::Breakdown)
        }

        fn shape(&self) -> (usize, usize) {
            (0, 0)
        }

        fn u(&self, _transpose: bool, _compact: bool) -> DynMatrix<f64> {
            unreachable!()
        }

        fn v(&self, _transpose: bool, _compact: bool) -> DynMatrix<f64> {
            unreachable!()
        }

        fn diagonal(&self) -> (&[f64], &[f64]) {
            unreachable!()
        }

        fn input_modified(&self) -> bool {
            false
        }
    }

    fn broken_second_stage() -> TallBidiagonal<f64, HouseholderQrp<f64>, BrokenBidiagonal> {
        TallBidiagonal::with_services(
            HouseholderQrp::new(),
            BrokenBidiagonal,
            TallBidiagonalSettings::default(),
        )
    }

    #[test]
    fn bidiagonal_failure_is_fatal() {
        let mut bd = broken_second_stage();
        assert_eq!(bd.decompose(&example_5x2()), Err(LinalgError::Breakdown));
        assert_eq!(bd.state(), DecompositionState::Failed);
        assert_eq!(bd.pivoted_qr().state(), DecompositionState::Decomposed);
    }

    #[test]
    #[should_panic(expected = "has not succeeded")]
    fn accessor_after_bidiagonal_failure() {
        let mut bd = broken_second_stage();
        let _ = bd.decompose(&example_5x2());
        let _ = bd.diagonal();
    }

    #[test]
    fn tiny_and_huge_inputs() {
        let base = example_5x2();
        for scale in [1e-20, 1e-17, 1e160] {
            let a = &base * scale;
            let mut bd = TallBidiagonal::new();
            bd.decompose(&a).unwrap();
            assert_eq!(bd.pivoted_qr().rank(), 2);
            let max = a.element_max_abs();
            let usv = reconstruct(&bd, false);
            for i in 0..5 {
                for j in 0..2 {
                    let rel = (usv[(i, j)] - a[(i, j)]).abs() / max;
                    assert!(rel < 1e-12, "scale {:e}: ({},{}) off by {:e}", scale, i, j, rel);
                }
            }
            let u = bd.u(false, false);
            assert_mat_near(&(&u.transpose() * &u), &DynMatrix::eye(5, 0.0), TOL, "UᵀU");
        }
    }

    #[test]
    fn non_finite_input() {
        let mut a = example_5x2();
        a[(3, 1)] = f64::NAN;
        let mut bd = TallBidiagonal::new();
        assert_eq!(bd.decompose(&a), Err(LinalgError::NonFinite));
        assert_eq!(bd.state(), DecompositionState::Failed);
    }

    #[test]
    #[should_panic(expected = "has not succeeded")]
    fn accessor_before_decompose() {
        let bd = TallBidiagonal::<f64>::new();
        let _ = bd.v(false, true);
    }

    #[test]
    fn default_threshold_is_epsilon() {
        let s = TallBidiagonalSettings::<f64>::default();
        assert_eq!(s.threshold_scale, f64::EPSILON);
        assert_eq!(TallBidiagonal::<f64>::new().settings(), &s);
    }
}
