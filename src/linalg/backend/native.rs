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

use super::{Decompositions, SymmetricEigen};
use crate::c_matrix::CMatrix;
use crate::errors::{numerical_failure, LinalgError};
use crate::settings::BackendSettings;

use nalgebra::{DMatrix, SVD};
use ndarray::Array2;

/// Pure-Rust backend on top of `nalgebra`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Nalgebra {
    pub settings: BackendSettings,
}

impl Nalgebra {
    pub fn new(settings: BackendSettings) -> Self { Nalgebra { settings } }
}

fn to_dmatrix(mat: &CMatrix) -> DMatrix<f64>
{ DMatrix::from_row_slice(mat.nrows(), mat.ncols(), mat.c_order_data()) }

fn from_dmatrix(mat: &DMatrix<f64>) -> Array2<f64>
{ Array2::from_shape_fn(mat.shape(), |(r, c)| mat[(r, c)]) }

impl Decompositions for Nalgebra {
    fn least_squares_svd(&self, matrix: CMatrix, rhs: CMatrix) -> Result<Array2<f64>, LinalgError> {
        assert_eq!(matrix.nrows(), rhs.nrows());
        let (rows, cols) = matrix.dim();

        let svd = SVD::try_new(
            to_dmatrix(&matrix), true, true,
            ::std::f64::EPSILON, self.settings.max_iterations,
        ).ok_or_else(|| numerical_failure(format!("SVD of a {}x{} matrix did not converge", rows, cols)))?;

        let sigma_max = svd.singular_values.iter().cloned().fold(0.0, f64::max);
        let cutoff = usize::max(rows, cols) as f64 * sigma_max * ::std::f64::EPSILON;

        let x = svd.solve(&to_dmatrix(&rhs), cutoff).map_err(numerical_failure)?;
        Ok(from_dmatrix(&x))
    }

    fn lu_solve(&self, square: CMatrix, rhs: CMatrix) -> Result<CMatrix, LinalgError> {
        assert!(square.is_square());
        assert_eq!(square.ncols(), rhs.nrows());

        let lu = to_dmatrix(&square).lu();

        // U carries the pivots on its diagonal.  (negated so that NaN counts as singular)
        let threshold = self.settings.singularity_threshold;
        if lu.u().diagonal().iter().any(|pivot| !(pivot.abs() >= threshold)) {
            return Err(LinalgError::SingularMatrix);
        }

        let x = lu.solve(&to_dmatrix(&rhs)).ok_or(LinalgError::SingularMatrix)?;
        Ok(from_dmatrix(&x).into())
    }

    fn symmetric_eigen(&self, matrix: CMatrix) -> Result<SymmetricEigen, LinalgError> {
        assert!(matrix.is_square());
        let n = matrix.nrows();

        let eigen = nalgebra::SymmetricEigen::try_new(
            to_dmatrix(&matrix), ::std::f64::EPSILON, self.settings.max_iterations,
        ).ok_or_else(|| numerical_failure(format!("eigensolver did not converge for a {}x{} matrix", n, n)))?;

        Ok(SymmetricEigen {
            values: eigen.eigenvalues.iter().cloned().collect(),
            vectors: from_dmatrix(&eigen.eigenvectors),
        })
    }
}
