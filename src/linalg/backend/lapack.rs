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

use lapacke::Layout;
use ndarray::{s, Array2, Axis};

/// Backend on top of LAPACKe (`dgelss`, `dgesv`, `dsyev`).
///
/// `max_iterations` is ignored; LAPACK uses its own limits.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Lapacke {
    pub settings: BackendSettings,
}

impl Lapacke {
    pub fn new(settings: BackendSettings) -> Self { Lapacke { settings } }
}

impl Decompositions for Lapacke {
    /// Uses dgelss.
    fn least_squares_svd(&self, mut matrix: CMatrix, rhs: CMatrix) -> Result<Array2<f64>, LinalgError> {
        assert_eq!(matrix.nrows(), rhs.nrows());

        let m = matrix.nrows() as i32;
        let n = matrix.ncols() as i32;
        let nrhs = rhs.ncols() as i32;

        // dgelss writes the solution into B, so B needs room for max(m, n) rows.
        let mut b = Array2::<f64>::zeros((i32::max(m, n) as usize, nrhs as usize));
        b.slice_mut(s![..m as usize, ..]).assign(&*rhs);
        let mut b = CMatrix::from(b);

        let lda = matrix.stride() as i32;
        let ldb = b.stride() as i32;

        // relative cutoff on singular values, matching the nalgebra backend
        let rcond = i32::max(m, n) as f64 * ::std::f64::EPSILON;

        // lapacke hates size-zero arrays.
        assert!(m > 0 && n > 0 && nrhs > 0, "(BUG) empty system reached the backend");
        {
            let a = matrix.c_order_data_mut();
            let b = b.c_order_data_mut();

            let mut s = vec![0f64; i32::min(m, n) as usize];
            let mut rank = 0;

            match unsafe { lapacke::dgelss(Layout::RowMajor, m, n, nrhs, a, lda, b, ldb, &mut s, rcond, &mut rank) } {
                0 => { /* okey dokey */ },
                info if info < 0 => panic!("bad arg number {} to dgelss", -info),
                info => return Err(numerical_failure(format!("error during SVD ({} non-converging elements)", info))),
            }
        } // end borrows

        Ok(b.slice_axis(Axis(0), (..n as usize).into()).to_owned())
    }

    /// Uses dgesv.
    fn lu_solve(&self, mut square: CMatrix, mut rhs: CMatrix) -> Result<CMatrix, LinalgError> {
        assert!(square.is_square());
        assert_eq!(square.ncols(), rhs.nrows());

        let n = rhs.nrows() as i32;
        let nrhs = rhs.ncols() as i32;
        let lda = square.stride() as i32;
        let ldb = rhs.stride() as i32;

        assert!(n > 0 && nrhs > 0, "(BUG) empty system reached the backend");
        {
            let a = square.c_order_data_mut();
            let b = rhs.c_order_data_mut();

            let mut ipiv = vec![0; n as usize];

            match unsafe { lapacke::dgesv(Layout::RowMajor, n, nrhs, a, lda, &mut ipiv, b, ldb) } {
                0 => { /* okey dokey */ },
                info if info < 0 => panic!("bad arg number {} to dgesv", -info),
                _ => return Err(LinalgError::SingularMatrix),
            }
        } // end borrows

        // dgesv leaves the LU factors in A, with U's diagonal holding the pivots.
        let threshold = self.settings.singularity_threshold;
        if square.diag().iter().any(|pivot| !(pivot.abs() >= threshold)) {
            return Err(LinalgError::SingularMatrix);
        }
        Ok(rhs)
    }

    /// Uses dsyev.  Eigenvalues come out in ascending order.
    fn symmetric_eigen(&self, mut matrix: CMatrix) -> Result<SymmetricEigen, LinalgError> {
        assert!(matrix.is_square());

        let n = matrix.nrows() as i32;
        let lda = matrix.stride() as i32;
        let mut values = vec![0f64; n as usize];

        assert!(n > 0, "(BUG) empty matrix reached the backend");
        {
            let a = matrix.c_order_data_mut();
            match unsafe { lapacke::dsyev(Layout::RowMajor, b'V', b'U', n, a, lda, &mut values) } {
                0 => { /* okey dokey */ },
                info if info < 0 => panic!("bad arg number {} to dsyev", -info),
                info => return Err(numerical_failure(format!("eigensolver failed to converge ({} off-diagonal elements)", info))),
            }
        } // end borrows

        // on exit, A holds the orthonormal eigenvectors as columns
        Ok(SymmetricEigen { values, vectors: matrix.into_inner() })
    }
}
