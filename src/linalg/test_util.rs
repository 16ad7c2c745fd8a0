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

use factorlab_random::{Generator, MersenneTwister};
use ndarray::{Array2, Axis};

/// A reproducible random correlation matrix of full rank.
///
/// Built as `G G^T` for a random `G` with unit rows, so it is positive definite with unit diagonal.
pub fn random_correlation(seed: i64, n: usize) -> Array2<f64> {
    let mut rng = MersenneTwister::new(seed);
    let mut loadings = Array2::from_shape_fn((n, n), |_| 2.0 * rng.next_double() - 1.0);
    for mut row in loadings.axis_iter_mut(Axis(0)) {
        let norm = f64::sqrt(row.dot(&row));
        row.mapv_inplace(|x| x / norm);
    }

    let mut corr = loadings.dot(&loadings.t());
    corr.diag_mut().fill(1.0);
    corr
}
