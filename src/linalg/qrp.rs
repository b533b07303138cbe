use alloc::vec::Vec;
use tracing::{debug, trace};

use crate::dynmatrix::DynMatrix;
use crate::linalg::{check_finite, scaled_norm, DecompositionState, LinalgError, PivotedQr};
use crate::traits::{FloatScalar, MatrixRef};
use crate::views::PermutationMatrix;

/// Copy `a` into `dst`, reusing its allocation.
pub(crate) fn copy_into<T: FloatScalar, M: MatrixRef<T> + ?Sized>(a: &M, dst: &mut DynMatrix<T>) {
    let (m, n) = a.shape();
    dst.reshape(m, n);
    for i in 0..m {
        let out = dst.row_slice_mut(i);
        match a.dense_row(i) {
            Some(src) => out.copy_from_slice(src),
            None => {
                for (j, x) in out.iter_mut().enumerate() {
                    *x = a.at(i, j);
                }
            }
        }
    }
}

fn column_norm<T: FloatScalar>(a: &DynMatrix<T>, col: usize, row_start: usize) -> T {
    scaled_norm((row_start..a.nrows()).map(|i| a[(i, col)]))
}

/// Householder QR with column pivoting, in place.
///
/// At step `k` the remaining column with the largest norm (rows `k..m`) is
/// swapped into position `k` and reduced. Factorization stops once that
/// largest norm is at most `threshold`; the remaining `tau` entries are
/// zero so their reflectors are the identity.
///
/// On return `a` holds R in its upper triangle and the scaled Householder
/// vectors below the diagonal, `pivots[k]` is the original index of the
/// column now at `k`, and the numerical rank is returned.
///
/// `norms` is scratch space of length `n`.
pub(crate) fn qrp_in_place<T: FloatScalar>(
    a: &mut DynMatrix<T>,
    tau: &mut [T],
    pivots: &mut [usize],
    norms: &mut [T],
    threshold: T,
) -> Result<usize, LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    let k_max = m.min(n);
    assert_eq!(tau.len(), k_max, "tau length must equal min(M, N)");
    assert_eq!(pivots.len(), n, "pivot length must equal N");
    assert_eq!(norms.len(), n, "norm scratch length must equal N");

    for (j, p) in pivots.iter_mut().enumerate() {
        *p = j;
    }
    for (j, nrm) in norms.iter_mut().enumerate() {
        *nrm = column_norm(a, j, 0);
    }
    tau.fill(T::zero());

    for col in 0..k_max {
        let mut pivot = col;
        for j in (col + 1)..n {
            if norms[j] > norms[pivot] {
                pivot = j;
            }
        }
        if norms[pivot] <= threshold {
            return Ok(col);
        }
        if pivot != col {
            a.swap_cols(col, pivot);
            norms.swap(col, pivot);
            pivots.swap(col, pivot);
        }

        let norm = column_norm(a, col, col);
        let a_cc = a[(col, col)];
        let sigma = if a_cc < T::zero() { T::zero() - norm } else { norm };
        if !sigma.is_finite() || sigma == T::zero() {
            debug!("pivoted QR breakdown at column {}: sigma = {:?}", col, sigma);
            return Err(LinalgError::Breakdown);
        }

        let v0 = a_cc + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;
        for i in (col + 1)..m {
            a[(i, col)] = a[(i, col)] / v0;
        }

        // A[col.., j] -= tau * v * (vᵀ A[col.., j]) for the trailing columns
        for j in (col + 1)..n {
            let mut dot = a[(col, j)];
            for i in (col + 1)..m {
                dot = dot + a[(i, col)] * a[(i, j)];
            }
            dot = dot * tau_val;
            a[(col, j)] = a[(col, j)] - dot;
            for i in (col + 1)..m {
                a[(i, j)] = a[(i, j)] - dot * a[(i, col)];
            }
        }

        a[(col, col)] = T::zero() - sigma;

        for j in (col + 1)..n {
            norms[j] = column_norm(a, j, col + 1);
        }
    }

    Ok(k_max)
}

/// Pivoted QR decomposition `A · P = Q · R` of an `m x n` matrix.
///
/// Works for any shape. The factorization is kept packed; `q` and `r`
/// are formed on request.
///
/// # Example
///
/// ```
/// use matview::DynMatrix;
/// use matview::linalg::{HouseholderQrp, PivotedQr};
///
/// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// let mut qrp = HouseholderQrp::new();
/// qrp.decompose(&a).unwrap();
///
/// // the larger column goes first
/// assert_eq!(qrp.pivots(), &[1, 0]);
///
/// // column k of A·P is column pivots[k] of A
/// let ap = DynMatrix::from_fn(3, 2, |i, k| a[(i, qrp.pivots()[k])]);
/// let qr = &qrp.q(true) * &qrp.r(true);
/// for i in 0..3 {
///     for j in 0..2 {
///         assert!((qr[(i, j)] - ap[(i, j)]).abs() < 1e-12);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HouseholderQrp<T> {
    qr: DynMatrix<T>,
    tau: Vec<T>,
    pivots: Vec<usize>,
    norms: Vec<T>,
    rank: usize,
    threshold: T,
    state: DecompositionState,
}

impl<T: FloatScalar> Default for HouseholderQrp<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatScalar> HouseholderQrp<T> {
    /// An empty decomposition with a zero singular threshold (only exactly
    /// zero columns count as negligible).
    pub fn new() -> Self {
        Self {
            qr: DynMatrix::zeros(0, 0, T::zero()),
            tau: Vec::new(),
            pivots: Vec::new(),
            norms: Vec::new(),
            rank: 0,
            threshold: T::zero(),
            state: DecompositionState::Undecomposed,
        }
    }

    /// Where the last `decompose` left this service.
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    /// Column norm at or below which factorization stops.
    pub fn singular_threshold(&self) -> T {
        self.threshold
    }

    /// Number of columns reduced before the remaining norms fell to the
    /// threshold.
    pub fn rank(&self) -> usize {
        self.assert_decomposed();
        self.rank
    }

    /// `pivots[k]` is the original index of the column moved to `k`.
    pub fn pivots(&self) -> &[usize] {
        self.assert_decomposed();
        &self.pivots
    }

    fn assert_decomposed(&self) {
        assert!(
            self.state == DecompositionState::Decomposed,
            "pivoted QR has not been successfully decomposed (state: {:?})",
            self.state,
        );
    }
}

impl<T: FloatScalar> PivotedQr<T> for HouseholderQrp<T> {
    fn set_singular_threshold(&mut self, threshold: T) {
        self.threshold = threshold;
    }

    fn decompose<M: MatrixRef<T> + ?Sized>(&mut self, a: &M) -> Result<(), LinalgError> {
        let (m, n) = a.shape();
        self.state = DecompositionState::Failed;
        if let Err(e) = check_finite(a) {
            debug!("pivoted QR rejected {}x{} input: {}", m, n, e);
            return Err(e);
        }

        copy_into(a, &mut self.qr);
        self.tau.resize(m.min(n), T::zero());
        self.pivots.resize(n, 0);
        self.norms.resize(n, T::zero());

        let rank = qrp_in_place(
            &mut self.qr,
            &mut self.tau,
            &mut self.pivots,
            &mut self.norms,
            self.threshold,
        )?;
        trace!("pivoted QR of {}x{}: rank {}", m, n, rank);

        self.rank = rank;
        self.state = DecompositionState::Decomposed;
        Ok(())
    }

    fn r(&self, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        let (m, n) = self.qr.shape();
        let min = m.min(n);
        let rows = if compact { min } else { m };
        let mut r = DynMatrix::zeros(rows, n, T::zero());
        for i in 0..min {
            r.row_slice_mut(i)[i..].copy_from_slice(&self.qr.row_slice(i)[i..]);
        }
        r
    }

    fn q(&self, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        let (m, n) = self.qr.shape();
        let min = m.min(n);
        let cols = if compact { min } else { m };
        let mut q = DynMatrix::thin_eye(m, cols);

        // Apply reflectors in reverse; reflector k leaves columns < k alone.
        for k in (0..min).rev() {
            let tau_val = self.tau[k];
            if tau_val == T::zero() {
                continue;
            }
            for j in k..cols {
                let mut dot = q[(k, j)];
                for i in (k + 1)..m {
                    dot = dot + self.qr[(i, k)] * q[(i, j)];
                }
                dot = dot * tau_val;
                q[(k, j)] = q[(k, j)] - dot;
                for i in (k + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, k)];
                }
            }
        }
        q
    }

    fn pivot_matrix(&self) -> PermutationMatrix<T> {
        self.assert_decomposed();
        let mut perm = alloc::vec![0; self.pivots.len()];
        for (k, &p) in self.pivots.iter().enumerate() {
            perm[p] = k;
        }
        PermutationMatrix::from_vec(perm)
    }

    fn input_modified(&self) -> bool {
        false
    }
}
