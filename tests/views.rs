use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use matview::views::band_length;
use matview::{
    AxisVector, Banded, BandedMatrix, DynMatrix, DynVector, MatrixMut, MatrixRef,
    PermutationMatrix, TridiagonalMatrix, VectorRef,
};

fn random_perm(rng: &mut StdRng, n: usize) -> PermutationMatrix<f64> {
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(rng);
    PermutationMatrix::from_vec(idx)
}

fn random_matrix(rng: &mut StdRng, nrows: usize, ncols: usize) -> DynMatrix<f64> {
    DynMatrix::from_fn(nrows, ncols, |_, _| rng.random_range(-1.0..1.0))
}

// ── Permutations ─────────────────────────────────────────────────────

#[test]
fn permutation_row_gather_matches_dense_product() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [1, 2, 5, 9] {
        let p = random_perm(&mut rng, n);
        assert!(p.validate().is_ok());
        let a = random_matrix(&mut rng, n, 4);
        assert_eq!(p.inner_product(&a), &p.to_dense() * &a);

        let b = random_matrix(&mut rng, 3, n);
        assert_eq!(p.gather_columns(&b), &b * &p.to_dense().transpose());
    }
}

#[test]
fn permutation_transform_matches_rows() {
    let mut rng = StdRng::seed_from_u64(12);
    let n = 8;
    let p = random_perm(&mut rng, n);
    let v = DynVector::from_fn(n, |i| (i * i) as f64 + 0.5);
    let mut out = DynVector::zeros(n, 0.0);
    p.transform(&v, &mut out).unwrap();
    for i in 0..n {
        assert_eq!(out[i], p.row(i).dot(&v));
        assert_eq!(out[i], v[p.indices()[i]]);
    }

    // the inverse undoes it
    let mut back = vec![0.0; n];
    p.inverse().transform(&out, back.as_mut_slice()).unwrap();
    assert_eq!(back.as_slice(), v.as_slice());
}

#[test]
fn permutation_swaps_are_self_inverse() {
    let mut rng = StdRng::seed_from_u64(13);
    let n = 7;
    let p = random_perm(&mut rng, n);
    for _ in 0..20 {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);

        let mut q = p.clone();
        q.swap_rows(i, j);
        q.swap_rows(i, j);
        assert_eq!(q, p);

        q.swap_columns(i, j);
        assert!(q.validate().is_ok());
        q.swap_columns(i, j);
        assert_eq!(q, p);
    }
}

#[test]
fn permutation_columns_are_axis_vectors() {
    let p = PermutationMatrix::<f64>::new(&[2, 0, 1]);
    let dense = p.to_dense();
    for j in 0..3 {
        let col = p.column(j);
        for i in 0..3 {
            assert_eq!(col.at(i), dense[(i, j)]);
        }
    }
    assert_eq!(p.column(2).axis(), 0);
}

#[test]
fn axis_vector_dot() {
    let e = AxisVector::<f64>::new(3, 5);
    let v = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(e.dot(&v[..]), 4.0);
    assert_eq!(e.to_dyn_vector().as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0]);
}

// ── Banded matrices ──────────────────────────────────────────────────

#[test]
fn band_lengths_cover_every_element() {
    for (m, n) in [(4, 4), (3, 6), (6, 3), (1, 5)] {
        let total: usize = (-(m as isize) + 1..n as isize)
            .map(|b| band_length(m, n, b))
            .sum();
        assert_eq!(total, m * n, "{}x{}", m, n);
    }
}

#[test]
fn banded_from_dense_keeps_band_and_drops_the_rest() {
    let mut rng = StdRng::seed_from_u64(21);
    for (m, n, lo, up) in [(5, 5, -1, 2), (4, 7, -2, 1), (7, 4, 0, 0), (6, 3, -3, 2)] {
        let a = random_matrix(&mut rng, m, n);
        let b = BandedMatrix::from_dense(&a, lo, up);
        assert!(b.validate().is_ok());
        let d = b.to_dense();
        for i in 0..m {
            for j in 0..n {
                let off = j as isize - i as isize;
                let expected = if off >= lo && off <= up { a[(i, j)] } else { 0.0 };
                assert_eq!(d[(i, j)], expected, "({}, {})", i, j);
            }
        }
    }
}

#[test]
fn banded_row_dot_matches_dense() {
    let mut rng = StdRng::seed_from_u64(22);
    let a = random_matrix(&mut rng, 6, 8);
    let b = BandedMatrix::from_dense(&a, -2, 3);
    let dense = b.to_dense();
    let x: Vec<f64> = (0..8).map(|_| rng.random_range(-1.0..1.0)).collect();
    for r in 0..6 {
        let expected: f64 = (0..8).map(|j| dense[(r, j)] * x[j]).sum();
        assert_abs_diff_eq!(b.row_dot(r, &x[..]), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(b.band_row(r).dot(&x[..]), expected, epsilon = 1e-12);
    }
}

#[test]
fn banded_writes_respect_structure() {
    let mut b = BandedMatrix::zeros(4, 4, -1, 1, 0.0_f64);
    b.set(2, 3, 7.0).unwrap();
    assert_eq!(b.get(2, 3).unwrap(), 7.0);
    assert!(b.set(0, 3, 1.0).is_err());
    assert!(b.set(0, 3, 0.0).is_ok());
    assert!(b.set(4, 0, 0.0).is_err());
    assert_eq!(b.upper_bandwidth(), 1);
    assert_eq!(b.lower_bandwidth(), 0);
}

#[test]
fn tridiagonal_mul_vec() {
    let t = TridiagonalMatrix::from_bands(
        vec![1.0_f64, 1.0, 1.0],
        vec![-2.0, -2.0, -2.0, -2.0],
        vec![1.0, 1.0, 1.0],
    );
    let x = [1.0, 2.0, 3.0, 4.0];
    // second difference of a line is zero away from the boundary
    assert_eq!(t.mul_vec(&x), vec![0.0, 0.0, 0.0, -5.0]);
}
