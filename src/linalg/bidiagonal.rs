use alloc::vec::Vec;
use tracing::debug;

use crate::dynmatrix::DynMatrix;
use crate::linalg::qrp::copy_into;
use crate::linalg::{
    check_finite, scaled_norm, BidiagonalDecomposition, DecompositionState, LinalgError,
};
use crate::traits::{FloatScalar, MatrixRef};
use crate::views::band_length;

/// Householder reflector for the vector `x = [x0, tail..]` given `‖tail‖`.
///
/// Returns `(tau, beta)` with `H x = beta e₀`, and calls `scale_tail(v₀)` so
/// the caller can store the reflector tail divided by `v₀`. An exactly zero
/// tail needs no reflector: `tau` is zero and `beta` is `x0`.
fn householder<T: FloatScalar>(
    x0: T,
    tail_norm: T,
    scale_tail: impl FnOnce(T),
) -> Result<(T, T), LinalgError> {
    if tail_norm == T::zero() {
        return Ok((T::zero(), x0));
    }
    let norm = x0.hypot(tail_norm);
    // same sign as x0 so v0 = x0 + sigma never cancels
    let sigma = if x0 < T::zero() { T::zero() - norm } else { norm };
    if !sigma.is_finite() {
        return Err(LinalgError::Breakdown);
    }
    let v0 = x0 + sigma;
    scale_tail(v0);
    Ok((v0 / sigma, T::zero() - sigma))
}

/// Reduce an `m x n` matrix (any shape) to upper bidiagonal form in place.
///
/// On return `a` holds the left reflectors below the diagonal (column `k`,
/// rows `k+1..`) and the right reflectors right of the superdiagonal
/// (row `k`, columns `k+2..`). `diag` gets the `min(m,n)` diagonal entries
/// and `off` the superdiagonal: `min - 1` entries when `n <= m`, `min`
/// when `n > m`.
pub(crate) fn bidiagonalize_in_place<T: FloatScalar>(
    a: &mut DynMatrix<T>,
    gammas_u: &mut [T],
    gammas_v: &mut [T],
    diag: &mut [T],
    off: &mut [T],
) -> Result<(), LinalgError> {
    let (m, n) = a.shape();
    let min = m.min(n);
    assert_eq!(gammas_u.len(), min, "gammas_u length must equal min(M, N)");
    assert_eq!(gammas_v.len(), min, "gammas_v length must equal min(M, N)");
    assert_eq!(diag.len(), min, "diagonal length must equal min(M, N)");
    let w = if n > m { min + 1 } else { min };
    assert_eq!(off.len(), band_length(min, w, 1), "superdiagonal length mismatch");

    for k in 0..min {
        // ── Left reflector: zero a[k+1.., k] ──
        let tail = scaled_norm((k + 1..m).map(|i| a[(i, k)]));
        let (tau, beta) = householder(a[(k, k)], tail, |v0| {
            for i in (k + 1)..m {
                a[(i, k)] = a[(i, k)] / v0;
            }
        })?;
        gammas_u[k] = tau;
        diag[k] = beta;
        if tau != T::zero() {
            for j in (k + 1)..n {
                let mut dot = a[(k, j)];
                for i in (k + 1)..m {
                    dot = dot + a[(i, k)] * a[(i, j)];
                }
                dot = dot * tau;
                a[(k, j)] = a[(k, j)] - dot;
                for i in (k + 1)..m {
                    a[(i, j)] = a[(i, j)] - dot * a[(i, k)];
                }
            }
        }
        a[(k, k)] = beta;

        // ── Right reflector: zero a[k, k+2..] ──
        gammas_v[k] = T::zero();
        if k + 2 < n {
            let row = a.row_slice_mut(k);
            let tail = scaled_norm(row[k + 2..].iter().copied());
            let (tau, beta) = householder(row[k + 1], tail, |v0| {
                for x in &mut row[k + 2..] {
                    *x = *x / v0;
                }
            })?;
            gammas_v[k] = tau;
            off[k] = beta;
            if tau != T::zero() {
                for i in (k + 1)..m {
                    let mut dot = a[(i, k + 1)];
                    for j in (k + 2)..n {
                        dot = dot + a[(i, j)] * a[(k, j)];
                    }
                    dot = dot * tau;
                    a[(i, k + 1)] = a[(i, k + 1)] - dot;
                    for j in (k + 2)..n {
                        a[(i, j)] = a[(i, j)] - dot * a[(k, j)];
                    }
                }
            }
            a[(k, k + 1)] = beta;
        } else if k + 1 < n {
            off[k] = a[(k, k + 1)];
        }
    }
    Ok(())
}

/// Householder bidiagonalization `A = U · B · Vᵀ` working row by row on the
/// full input.
///
/// Reflectors are kept packed; `u` and `v` are formed on request.
///
/// # Example
///
/// ```
/// use matview::{DynMatrix, MatrixRef};
/// use matview::linalg::{BidiagonalDecomposition, BidiagonalRow};
///
/// let a = DynMatrix::from_rows(3, 3, &[4.0_f64, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, 0.0, 5.0]);
/// let mut bd = BidiagonalRow::new();
/// bd.decompose(&a).unwrap();
///
/// let usv = &(&bd.u(false, true) * &bd.b(true)) * &bd.v(true, true);
/// for i in 0..3 {
///     for j in 0..3 {
///         assert!((usv[(i, j)] - a[(i, j)]).abs() < 1e-12);
///     }
/// }
/// assert_eq!(bd.b(true).at(2, 0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BidiagonalRow<T> {
    ubv: DynMatrix<T>,
    gammas_u: Vec<T>,
    gammas_v: Vec<T>,
    diag: Vec<T>,
    off: Vec<T>,
    state: DecompositionState,
}

impl<T: FloatScalar> Default for BidiagonalRow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatScalar> BidiagonalRow<T> {
    pub fn new() -> Self {
        Self {
            ubv: DynMatrix::zeros(0, 0, T::zero()),
            gammas_u: Vec::new(),
            gammas_v: Vec::new(),
            diag: Vec::new(),
            off: Vec::new(),
            state: DecompositionState::Undecomposed,
        }
    }

    /// Where the last `decompose` left this service.
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    fn assert_decomposed(&self) {
        assert!(
            self.state == DecompositionState::Decomposed,
            "bidiagonal decomposition has not succeeded (state: {:?})",
            self.state,
        );
    }

    /// Compact width of `B` and `V`.
    fn compact_width(&self) -> usize {
        let (m, n) = self.ubv.shape();
        let min = m.min(n);
        if n > m {
            min + 1
        } else {
            min
        }
    }
}

impl<T: FloatScalar> BidiagonalDecomposition<T> for BidiagonalRow<T> {
    fn decompose<M: MatrixRef<T> + ?Sized>(&mut self, a: &M) -> Result<(), LinalgError> {
        let (m, n) = a.shape();
        self.state = DecompositionState::Failed;
        if let Err(e) = check_finite(a) {
            debug!("bidiagonalization rejected {}x{} input: {}", m, n, e);
            return Err(e);
        }

        copy_into(a, &mut self.ubv);
        let min = m.min(n);
        let w = self.compact_width();
        self.gammas_u.resize(min, T::zero());
        self.gammas_v.resize(min, T::zero());
        self.diag.resize(min, T::zero());
        self.off.clear();
        self.off.resize(band_length(min, w, 1), T::zero());

        if let Err(e) = bidiagonalize_in_place(
            &mut self.ubv,
            &mut self.gammas_u,
            &mut self.gammas_v,
            &mut self.diag,
            &mut self.off,
        ) {
            debug!("bidiagonalization of {}x{} failed: {}", m, n, e);
            return Err(e);
        }

        self.state = DecompositionState::Decomposed;
        Ok(())
    }

    fn shape(&self) -> (usize, usize) {
        self.ubv.shape()
    }

    fn u(&self, transpose: bool, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        let (m, n) = self.ubv.shape();
        let min = m.min(n);
        let cols = if compact { min } else { m };
        let mut u = DynMatrix::thin_eye(m, cols);

        for k in (0..min).rev() {
            let tau = self.gammas_u[k];
            if tau == T::zero() {
                continue;
            }
            for j in k..cols {
                let mut dot = u[(k, j)];
                for i in (k + 1)..m {
                    dot = dot + self.ubv[(i, k)] * u[(i, j)];
                }
                dot = dot * tau;
                u[(k, j)] = u[(k, j)] - dot;
                for i in (k + 1)..m {
                    u[(i, j)] = u[(i, j)] - dot * self.ubv[(i, k)];
                }
            }
        }

        if transpose {
            u.transpose()
        } else {
            u
        }
    }

    fn v(&self, transpose: bool, compact: bool) -> DynMatrix<T> {
        self.assert_decomposed();
        let (m, n) = self.ubv.shape();
        let min = m.min(n);
        let cols = if compact { self.compact_width() } else { n };
        let mut v = DynMatrix::thin_eye(n, cols);

        // Right reflector k acts on rows k+1.. with vector [1, ubv[k, k+2..]].
        for k in (0..min).rev() {
            let tau = self.gammas_v[k];
            if tau == T::zero() {
                continue;
            }
            let refl = &self.ubv.row_slice(k)[k + 2..];
            for j in (k + 1)..cols {
                let mut dot = v[(k + 1, j)];
                for (off, &r) in refl.iter().enumerate() {
                    dot = dot + r * v[(k + 2 + off, j)];
                }
                dot = dot * tau;
                v[(k + 1, j)] = v[(k + 1, j)] - dot;
                for (off, &r) in refl.iter().enumerate() {
                    v[(k + 2 + off, j)] = v[(k + 2 + off, j)] - dot * r;
                }
            }
        }

        if transpose {
            v.transpose()
        } else {
            v
        }
    }

    fn diagonal(&self) -> (&[T], &[T]) {
        self.assert_decomposed();
        (&self.diag, &self.off)
    }

    fn input_modified(&self) -> bool {
        false
    }
}
