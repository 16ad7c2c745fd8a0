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

//! Rank reduction of correlation matrices.

use crate::backend::{default_backend, Decompositions};
use crate::errors::LinalgError;
use crate::factors::{factor_matrix_with, reconstruct};

use ndarray::{Array2, ArrayView2, Axis};

/// Factor matrix of a rank `num_factors` approximation to a correlation matrix,
/// which tries to keep the unit diagonal.
///
/// Plain PCA (see [`factor_matrix`](crate::factor_matrix)) would give rows whose squared
/// norms are the diagonal of the truncated matrix, which is generally less than 1.
/// Here the rows are rescaled to unit norm (see [`renormalize_rows`]), and since that
/// is not an orthogonal transformation, the result is then decomposed once more so that
/// the columns are again principal directions.
///
/// The output is a valid factor matrix of a positive semidefinite matrix, but its rows
/// are only *approximately* of unit norm.
///
/// The input is assumed to be a correlation matrix (symmetric, unit diagonal, entries
/// in `[-1, 1]`).  This is not checked.
pub fn factor_reduction(correlation: ArrayView2<'_, f64>, num_factors: usize) -> Result<Array2<f64>, LinalgError>
{ factor_reduction_with(&default_backend(), correlation, num_factors) }

pub fn factor_reduction_with<D>(backend: &D, correlation: ArrayView2<'_, f64>, num_factors: usize) -> Result<Array2<f64>, LinalgError>
where D: Decompositions + ?Sized,
{
    let mut factors = factor_matrix_with(backend, correlation, num_factors)?;
    renormalize_rows(&mut factors);

    // orthogonalize again
    let reduced = reconstruct(factors.view());
    factor_matrix_with(backend, reduced.view(), num_factors)
}

/// Scale each row of a factor matrix to unit norm.
///
/// A row that is entirely zero (a dimension that lies wholly in the discarded subspace,
/// e.g. a completely decorrelated system reduced to one factor) is instead filled with
/// `1.0`.  Such a row ends up with norm `sqrt(k)` rather than 1.
pub fn renormalize_rows(factors: &mut Array2<f64>) {
    for (i, mut row) in factors.axis_iter_mut(Axis(0)).enumerate() {
        let sum_sq = row.dot(&row);
        if sum_sq != 0.0 {
            let norm = f64::sqrt(sum_sq);
            row.mapv_inplace(|x| x / norm);
        } else {
            warn!("row {} of the factor matrix is zero; replacing it with ones", i);
            row.fill(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_matrix;
    use crate::test_util::random_correlation;
    use ndarray::arr2;

    #[test]
    fn full_rank_is_exact() {
        let corr = arr2(&[[1.0, 0.5], [0.5, 1.0]]);
        let factors = factor_reduction(corr.view(), 2).unwrap();
        assert_close!(abs=1e-9, reconstruct(factors.view()), corr);

        for seed in 0..10 {
            let n = 2 + seed as usize % 6;
            let corr = random_correlation(seed, n);
            let factors = factor_reduction(corr.view(), n).unwrap();
            assert_close!(abs=1e-9, reconstruct(factors.view()), corr);
        }
    }

    #[test]
    fn zero_rows_become_ones() {
        let mut factors = arr2(&[[3.0, 4.0], [0.0, 0.0], [0.0, -2.0]]);
        renormalize_rows(&mut factors);
        assert_eq!(factors, arr2(&[[0.6, 0.8], [1.0, 1.0], [0.0, -1.0]]));
    }

    #[test]
    fn decorrelated_to_one_factor() {
        let corr = arr2(&[[1.0, 0.0], [0.0, 1.0]]);

        // PCA keeps one of the two axes and entirely loses the other
        let mut factors = factor_matrix(corr.view(), 1).unwrap();
        let dropped: Vec<_> = (0..2).filter(|&i| factors[(i, 0)] == 0.0).collect();
        renormalize_rows(&mut factors);
        for &i in &dropped {
            assert_eq!(factors[(i, 0)], 1.0);
        }

        // both dimensions end up fully loaded on the single factor
        let factors = factor_reduction(corr.view(), 1).unwrap();
        assert_eq!(factors.dim(), (2, 1));
        assert_close!(abs=1e-12, factors, arr2(&[[1.0], [1.0]]));
    }

    #[test]
    fn rows_close_to_unit_norm() {
        for seed in 300..320 {
            let n = 3 + seed as usize % 5;
            let corr = random_correlation(seed, n);
            for k in 1..n {
                let plain = factor_matrix(corr.view(), k).unwrap();
                let reduced = factor_reduction(corr.view(), k).unwrap();
                assert_eq!(reduced.dim(), (n, k));

                let worst = |f: &Array2<f64>| {
                    f.axis_iter(Axis(0))
                        .map(|row| (row.dot(&row) - 1.0).abs())
                        .fold(0.0, f64::max)
                };
                // no row of these is zero after truncation, so the renormalized
                // factors survive the second decomposition intact
                assert!(worst(&reduced) < 1e-9, "seed {}, k = {}", seed, k);
                assert!(worst(&reduced) <= worst(&plain) + 1e-12, "seed {}, k = {}", seed, k);
            }
        }
    }

    #[test]
    fn result_is_its_own_factor_matrix() {
        let corr = random_correlation(42, 6);
        let reduced = factor_reduction(corr.view(), 3).unwrap();
        let again = factor_matrix(reconstruct(reduced.view()).view(), 3).unwrap();
        assert_close!(abs=1e-9, again, reduced);
    }

    #[test]
    fn argument_validation() {
        let corr = random_correlation(1, 4);
        match factor_reduction(corr.view(), 5) {
            Err(LinalgError::InvalidArgument(_)) => {},
            r => panic!("expected InvalidArgument, got {:?}", r),
        }
    }
}
