#[macro_use] extern crate factorlab_assert_close;

use factorlab_linalg::{self as linalg, LinalgError};
use factorlab_random::{Generator, MersenneTwister};
use ndarray::{arr2, Array1, Array2};

// Two groups of strongly correlated assets, weakly correlated across groups.
fn block_correlation(rng: &mut impl Generator, n: usize) -> Array2<f64> {
    let mut corr = Array2::from_shape_fn((n, n), |(i, j)| {
        let same_block = (i < n / 2) == (j < n / 2);
        let base = if same_block { 0.8 } else { 0.1 };
        base + 0.01 * (rng.next_double() - 0.5)
    });
    corr = (&corr + &corr.t()) / 2.0;
    corr.diag_mut().fill(1.0);
    corr
}

#[test]
fn full_rank_reduction_reproduces_input() {
    let corr = arr2(&[[1.0, 0.5], [0.5, 1.0]]);
    let factors = linalg::factor_reduction(corr.view(), 2).unwrap();
    assert_close!(abs=1e-9, linalg::reconstruct(factors.view()), corr);
}

#[test]
fn two_factor_model_of_two_blocks() {
    let mut rng = MersenneTwister::new(7);
    let corr = block_correlation(&mut rng, 8);

    let pca = linalg::factor_matrix(corr.view(), 2).unwrap();
    let reduced = linalg::factor_reduction(corr.view(), 2).unwrap();
    assert_eq!(reduced.dim(), (8, 2));

    // the first factor is the market: every asset loads on it with the same sign
    assert!(reduced.column(0).iter().all(|&x| x > 0.0));
    // the second separates the blocks
    let second = reduced.column(1);
    assert!(second[0] * second[7] < 0.0);

    // renormalization puts the diagonal back to one
    let implied = linalg::reconstruct(reduced.view());
    assert_close!(abs=1e-9, implied.diag().to_owned(), Array1::<f64>::ones(8));
    // while plain PCA falls short of it
    let pca_implied = linalg::reconstruct(pca.view());
    assert!(pca_implied.diag().iter().all(|&d| d < 1.0));
}

#[test]
fn decorrelated_system_to_one_factor() {
    let corr = Array2::<f64>::eye(3);
    let factors = linalg::factor_reduction(corr.view(), 1).unwrap();
    assert_eq!(factors.dim(), (3, 1));
    assert_close!(abs=1e-12, factors, Array2::<f64>::ones((3, 1)));
}

#[test]
fn inverse_roundtrip_and_solve() {
    let mut rng = MersenneTwister::new(2016);
    let n = 6;
    let mat = Array2::from_shape_fn((n, n), |(i, j)| {
        rng.next_double() + if i == j { n as f64 } else { 0.0 }
    });

    let inverse = linalg::invert(mat.view()).unwrap();
    assert_close!(rel=1e-9, abs=1e-12, linalg::invert(inverse.view()).unwrap(), mat.clone());

    let x = Array1::from_shape_fn(n, |_| rng.next_double());
    let b = mat.dot(&x);
    assert_close!(rel=1e-9, abs=1e-12, linalg::solve(mat.view(), b.view()).unwrap(), x.clone());
    assert_close!(rel=1e-9, abs=1e-12, inverse.dot(&b), x);
}

#[test]
fn error_kinds() {
    assert_eq!(linalg::invert(arr2(&[[1.0, 2.0], [2.0, 4.0]]).view()), Err(LinalgError::SingularMatrix));

    let corr = arr2(&[[1.0, 0.5], [0.5, 1.0]]);
    match linalg::factor_reduction(corr.view(), 0) {
        Err(LinalgError::InvalidArgument(_)) => {},
        r => panic!("{:?}", r),
    }
    match linalg::factor_matrix(Array2::zeros((3, 2)).view(), 1) {
        Err(LinalgError::DimensionMismatch(_)) => {},
        r => panic!("{:?}", r),
    }
}
