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

//! The decompositions everything else in this crate is built on.
//!
//! Nothing outside of this module knows which library actually performs an SVD,
//! an LU or an eigendecomposition.  The operations only see [`Decompositions`].

use crate::c_matrix::CMatrix;
use crate::errors::LinalgError;
use crate::settings::{BackendKind, BackendSettings};

use ndarray::Array2;

pub use self::native::Nalgebra;
mod native;

#[cfg(feature = "lapacke-backend")]
pub use self::lapack::Lapacke;
#[cfg(feature = "lapacke-backend")]
mod lapack;

/// The backend used by the functions that do not take one explicitly.
pub type DefaultBackend = Nalgebra;

pub fn default_backend() -> DefaultBackend { Nalgebra::default() }

/// Eigenvalues and eigenvectors of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// In whatever order the backend produced them.
    pub values: Vec<f64>,
    /// Column `i` belongs to `values[i]`.
    pub vectors: Array2<f64>,
}

/// Capability interface for a dense decomposition library.
///
/// Implementations receive owned, finite, non-empty matrices whose shapes have
/// already been validated, and must not keep any state between calls.
pub trait Decompositions {
    /// Minimizes the 2-norm of `matrix * x - rhs` for every column of `rhs`, via SVD.
    ///
    /// Among the minimizers, the one of least norm is returned.  Singular values at or below
    /// `max(rows, cols) * sigma_max * EPSILON` are treated as zero.
    ///
    /// `matrix` is `r x c` and `rhs` is `r x p`; the output is `c x p`.
    fn least_squares_svd(&self, matrix: CMatrix, rhs: CMatrix) -> Result<Array2<f64>, LinalgError>;

    /// Solves `square * x = rhs` through LU decomposition with partial pivoting.
    ///
    /// Fails with [`LinalgError::SingularMatrix`] when a pivot is smaller than the
    /// singularity threshold.
    fn lu_solve(&self, square: CMatrix, rhs: CMatrix) -> Result<CMatrix, LinalgError>;

    /// Full eigendecomposition of a symmetric matrix.
    fn symmetric_eigen(&self, matrix: CMatrix) -> Result<SymmetricEigen, LinalgError>;
}

impl<'a, D: Decompositions + ?Sized> Decompositions for &'a D {
    fn least_squares_svd(&self, matrix: CMatrix, rhs: CMatrix) -> Result<Array2<f64>, LinalgError>
    { (**self).least_squares_svd(matrix, rhs) }

    fn lu_solve(&self, square: CMatrix, rhs: CMatrix) -> Result<CMatrix, LinalgError>
    { (**self).lu_solve(square, rhs) }

    fn symmetric_eigen(&self, matrix: CMatrix) -> Result<SymmetricEigen, LinalgError>
    { (**self).symmetric_eigen(matrix) }
}

impl<D: Decompositions + ?Sized> Decompositions for Box<D> {
    fn least_squares_svd(&self, matrix: CMatrix, rhs: CMatrix) -> Result<Array2<f64>, LinalgError>
    { (**self).least_squares_svd(matrix, rhs) }

    fn lu_solve(&self, square: CMatrix, rhs: CMatrix) -> Result<CMatrix, LinalgError>
    { (**self).lu_solve(square, rhs) }

    fn symmetric_eigen(&self, matrix: CMatrix) -> Result<SymmetricEigen, LinalgError>
    { (**self).symmetric_eigen(matrix) }
}

impl BackendKind {
    /// Construct the named backend.
    ///
    /// Fails if the backend was not compiled in.
    pub fn build(self, settings: BackendSettings) -> Result<Box<dyn Decompositions + Send + Sync>, LinalgError> {
        match self {
            BackendKind::Nalgebra => Ok(Box::new(Nalgebra::new(settings))),

            #[cfg(feature = "lapacke-backend")]
            BackendKind::Lapacke => Ok(Box::new(Lapacke::new(settings))),

            #[cfg(not(feature = "lapacke-backend"))]
            BackendKind::Lapacke => Err(crate::errors::invalid_argument(
                "the lapacke backend requires the 'lapacke-backend' feature",
            )),
        }
    }
}
