use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use matview::linalg::{
    prefers_tall, BidiagonalDecomposition, BidiagonalRow, DecompositionState, TallBidiagonal,
    TallBidiagonalSettings,
};
use matview::{Banded, DynMatrix, MatrixRef};

fn random_matrix(rng: &mut StdRng, nrows: usize, ncols: usize) -> DynMatrix<f64> {
    DynMatrix::from_fn(nrows, ncols, |_, _| rng.random_range(-1.0..1.0))
}

fn assert_reconstructs(bd: &impl BidiagonalDecomposition<f64>, a: &DynMatrix<f64>, compact: bool) {
    let usv = &(&bd.u(false, compact) * &bd.b(compact)) * &bd.v(true, compact);
    let tol = 1e-10 * a.element_max_abs().max(1.0);
    assert_eq!(usv.shape(), a.shape());
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_abs_diff_eq!(usv[(i, j)], a[(i, j)], epsilon = tol);
        }
    }
}

fn assert_orthonormal_columns(q: &DynMatrix<f64>) {
    let qtq = &q.transpose() * q;
    let eye = DynMatrix::eye(q.ncols(), 0.0);
    for i in 0..q.ncols() {
        for j in 0..q.ncols() {
            assert_abs_diff_eq!(qtq[(i, j)], eye[(i, j)], epsilon = 1e-10);
        }
    }
}

#[test]
fn random_tall_matrices() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut bd = TallBidiagonal::new();
    for (m, n) in [(6, 2), (20, 4), (50, 7), (9, 5), (3, 1)] {
        let a = random_matrix(&mut rng, m, n);
        bd.decompose(&a).unwrap();
        assert_eq!(bd.state(), DecompositionState::Decomposed);

        assert_reconstructs(&bd, &a, true);
        assert_reconstructs(&bd, &a, false);
        assert_orthonormal_columns(&bd.u(false, true));
        assert_orthonormal_columns(&bd.u(false, false));
        assert_orthonormal_columns(&bd.v(false, false));

        let b = bd.bidiagonal();
        assert!(b.validate().is_ok());
        assert_eq!(b.shape(), (n, n));
        assert_eq!(b.lower_bandwidth(), 0);
    }
}

#[test]
fn agrees_with_direct_bidiagonalization() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_matrix(&mut rng, 30, 5);

    let mut tall = TallBidiagonal::new();
    tall.decompose(&a).unwrap();
    let mut direct = BidiagonalRow::new();
    direct.decompose(&a).unwrap();

    // orthogonal factors preserve the Frobenius norm
    let bt = tall.b(true);
    let bd = direct.b(true);
    assert_abs_diff_eq!(bt.frobenius_norm(), bd.frobenius_norm(), epsilon = 1e-10);
    assert_abs_diff_eq!(bt.frobenius_norm(), a.frobenius_norm(), epsilon = 1e-10);
}

#[test]
fn rank_deficient_tall() {
    let mut rng = StdRng::seed_from_u64(3);
    let basis = random_matrix(&mut rng, 25, 2);
    let mix = DynMatrix::from_rows(2, 4, &[1.0, 0.0, 2.0, -1.0, 0.0, 1.0, 0.5, 3.0]);
    let a = &basis * &mix;

    let mut bd = TallBidiagonal::with_settings(TallBidiagonalSettings {
        threshold_scale: 1e-12,
    });
    bd.decompose(&a).unwrap();
    assert_eq!(bd.pivoted_qr().rank(), 2);
    assert_reconstructs(&bd, &a, false);
}

#[test]
fn wide_matrix_shapes() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_matrix(&mut rng, 3, 8);
    assert!(!prefers_tall(3, 8));
    let mut bd = TallBidiagonal::new();
    bd.decompose(&a).unwrap();
    assert_eq!(bd.u(false, true).shape(), (3, 3));
    assert_eq!(bd.b(true).shape(), (3, 4));
    assert_eq!(bd.v(false, true).shape(), (8, 4));
    assert_eq!(bd.b(false).shape(), (3, 8));
    assert_reconstructs(&bd, &a, true);
    assert_reconstructs(&bd, &a, false);
}
