/* ************************************************************************ **
** This file is part of factorlab, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of factorlab is provided under this permissive     **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

//! Principal component extraction.

use crate::backend::{default_backend, Decompositions, SymmetricEigen};
use crate::c_matrix::check_finite;
use crate::errors::{dimension_mismatch, invalid_argument, LinalgError};

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// An eigenpair, remembering where the decomposition put it.
#[derive(Debug, Clone)]
struct EigenPair<'a> {
    index: usize,
    value: f64,
    vector: ArrayView1<'a, f64>,
}

/// The `num_factors` dominant eigenvectors of a symmetric matrix, each scaled by the
/// square root of its eigenvalue.
///
/// Columns of the `n x num_factors` output are ordered by descending eigenvalue, so
/// that `F F^T` is the best rank-`num_factors` approximation of the input.  (i.e. this is PCA)
///
/// Conventions, all chosen to make output reproducible:
///
/// * Equal eigenvalues keep the order in which the decomposition produced them.
/// * Negative eigenvalues are treated as zero.  Matrices coming out of earlier
///   approximations are often very slightly indefinite.
/// * The first entry of each column is made non-negative.
pub fn factor_matrix(correlation: ArrayView2<'_, f64>, num_factors: usize) -> Result<Array2<f64>, LinalgError>
{ factor_matrix_with(&default_backend(), correlation, num_factors) }

pub fn factor_matrix_with<D>(backend: &D, correlation: ArrayView2<'_, f64>, num_factors: usize) -> Result<Array2<f64>, LinalgError>
where D: Decompositions + ?Sized,
{
    let n = validate_factor_args(correlation, num_factors)?;

    let SymmetricEigen { values, vectors } = backend.symmetric_eigen(correlation.into())?;
    let mut pairs: Vec<_> = {
        izip!(0.., &values, vectors.axis_iter(Axis(1)))
            .map(|(index, &value, vector)| EigenPair { index, value, vector })
            .collect()
    };
    // descending; sort_by is stable, so ties stay in decomposition order
    pairs.sort_by(|a, b| b.value.total_cmp(&a.value));
    pairs.truncate(num_factors);

    trace!("selected eigenvalues: {:?}", pairs.iter().map(|p| p.value).collect::<Vec<_>>());

    let mut factors = Array2::zeros((n, num_factors));
    for (mut column, pair) in factors.axis_iter_mut(Axis(1)).zip(&pairs) {
        let value = f64::max(pair.value, 0.0);
        if pair.value < 0.0 {
            debug!("clamping eigenvalue {:e} (eigenvector {}) to zero", pair.value, pair.index);
        }

        let sign = if pair.vector[0] > 0.0 { 1.0 } else { -1.0 };
        let norm_sq = pair.vector.dot(&pair.vector);
        let scale = sign * f64::sqrt(value / norm_sq);
        column.assign(&(&pair.vector * scale));
    }
    Ok(factors)
}

/// `F F^T`; the correlation matrix implied by a factor matrix.
pub fn reconstruct(factors: ArrayView2<'_, f64>) -> Array2<f64>
{ factors.dot(&factors.t()) }

// returns the dimension
pub(crate) fn validate_factor_args(correlation: ArrayView2<'_, f64>, num_factors: usize) -> Result<usize, LinalgError> {
    let (rows, cols) = correlation.dim();
    if rows != cols {
        return Err(dimension_mismatch(format!("correlation matrix is not square ({}x{})", rows, cols)));
    }
    if !(1 <= num_factors && num_factors <= rows) {
        return Err(invalid_argument(format!(
            "number of factors must be between 1 and {}, got {}", rows, num_factors,
        )));
    }
    check_finite(correlation.iter())?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Nalgebra;
    use crate::c_matrix::CMatrix;
    use crate::test_util::random_correlation;
    use ndarray::arr2;

    #[test]
    fn full_rank_reconstructs() {
        for seed in 0..20 {
            let n = 1 + seed as usize % 7;
            let corr = random_correlation(seed, n);
            let factors = factor_matrix(corr.view(), n).unwrap();
            assert_eq!(factors.dim(), (n, n));
            assert_close!(abs=1e-10, reconstruct(factors.view()), corr);
        }
    }

    #[test]
    fn keeps_largest_eigenvalues() {
        for seed in 100..120 {
            let n = 2 + seed as usize % 6;
            let corr = random_correlation(seed, n);

            let mut spectrum = Nalgebra::default().symmetric_eigen(corr.clone().into()).unwrap().values;
            spectrum.sort_by(|a, b| b.total_cmp(a));

            for k in 1..=n {
                let factors = factor_matrix(corr.view(), k).unwrap();
                // each column carries exactly its eigenvalue
                let selected: Vec<_> = factors.axis_iter(Axis(1)).map(|c| c.dot(&c)).collect();
                let expected: Vec<_> = spectrum[..k].iter().map(|&x| f64::max(x, 0.0)).collect();
                assert_close!(abs=1e-10, selected, expected);
            }
        }
    }

    #[test]
    fn first_entry_nonnegative() {
        for seed in 200..230 {
            let n = 1 + seed as usize % 8;
            let factors = factor_matrix(random_correlation(seed, n).view(), n).unwrap();
            for column in factors.axis_iter(Axis(1)) {
                assert!(column[0] >= 0.0, "{}", factors);
            }
        }
        // anticorrelated
        let factors = factor_matrix(arr2(&[[1.0, -0.9], [-0.9, 1.0]]).view(), 2).unwrap();
        assert!(factors.row(0).iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn two_by_two() {
        // eigenvalues 1.5 for (1, 1) and 0.5 for (1, -1)
        let factors = factor_matrix(arr2(&[[1.0, 0.5], [0.5, 1.0]]).view(), 2).unwrap();
        let a = f64::sqrt(0.75);
        let b = f64::sqrt(0.25);
        assert_close!(abs=1e-12, factors, arr2(&[[a, b], [a, -b]]));
    }

    // hands back a fixed decomposition, with a tie between the two largest eigenvalues
    struct TiedEigen;

    impl Decompositions for TiedEigen {
        fn least_squares_svd(&self, _: CMatrix, _: CMatrix) -> Result<Array2<f64>, LinalgError>
        { unimplemented!() }

        fn lu_solve(&self, _: CMatrix, _: CMatrix) -> Result<CMatrix, LinalgError>
        { unimplemented!() }

        fn symmetric_eigen(&self, _: CMatrix) -> Result<SymmetricEigen, LinalgError> {
            Ok(SymmetricEigen {
                values: vec![1.0, 2.0, 2.0],
                vectors: arr2(&[
                    [1.0, 0.0, -3.0],
                    [0.0, 1.0, 0.0],
                    [0.0, 0.0, 4.0],
                ]),
            })
        }
    }

    #[test]
    fn ties_keep_decomposition_order() {
        let factors = factor_matrix_with(&TiedEigen, Array2::eye(3).view(), 3).unwrap();
        let r2 = f64::sqrt(2.0);
        assert_close!(abs=1e-12, factors, arr2(&[
            // a zero first entry counts as non-positive and gets flipped
            [0.0, 3.0 * r2 / 5.0, 1.0],
            [-r2, 0.0, 0.0],
            [0.0, -4.0 * r2 / 5.0, 0.0],
        ]));

        let factors = factor_matrix_with(&TiedEigen, Array2::eye(3).view(), 1).unwrap();
        assert_close!(abs=1e-12, factors, arr2(&[[0.0], [-r2], [0.0]]));
    }

    #[test]
    fn negative_eigenvalues_are_clamped() {
        // eigenvalues 3 and -1
        let mat = arr2(&[[1.0, 2.0], [2.0, 1.0]]);
        let factors = factor_matrix(mat.view(), 2).unwrap();
        assert_close!(abs=1e-12, factors.column(0).dot(&factors.column(0)), 3.0);
        assert_eq!(factors.column(1).iter().map(|x| x.abs()).sum::<f64>(), 0.0);
    }

    #[test]
    fn argument_validation() {
        let corr = random_correlation(7, 3);
        for &k in &[0, 4] {
            match factor_matrix(corr.view(), k) {
                Err(LinalgError::InvalidArgument(_)) => {},
                r => panic!("expected InvalidArgument for k = {}, got {:?}", k, r),
            }
        }
        match factor_matrix(Array2::zeros((2, 3)).view(), 1) {
            Err(LinalgError::DimensionMismatch(_)) => {},
            r => panic!("expected DimensionMismatch, got {:?}", r),
        }
        match factor_matrix(Array2::zeros((0, 0)).view(), 0) {
            Err(LinalgError::InvalidArgument(_)) => {},
            r => panic!("expected InvalidArgument, got {:?}", r),
        }
    }
}
