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

//! Linear systems and inverses.

use crate::backend::{default_backend, Decompositions};
use crate::c_matrix::check_finite;
use crate::errors::{dimension_mismatch, LinalgError};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Find `x` minimizing `|A x - b|`, with `A` being `r x c`, `b` of length `r`,
/// and `x` of length `c`.
///
/// This goes through the SVD pseudo-inverse, so it is equally happy with square,
/// overdetermined and underdetermined systems.  (for the latter, the least-norm
/// solution is produced)  When `A` is square and nonsingular, this is simply
/// the solution of `A x = b`.
pub fn solve(matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
{ solve_with(&default_backend(), matrix, rhs) }

pub fn solve_with<D>(backend: &D, matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
where D: Decompositions + ?Sized,
{
    let (rows, cols) = matrix.dim();
    if rhs.len() != rows {
        return Err(dimension_mismatch(format!(
            "matrix has {} rows but the right hand side has length {}", rows, rhs.len(),
        )));
    }
    check_finite(matrix.iter())?;
    check_finite(rhs.iter())?;

    // nothing to decompose; the zero vector is the least-norm solution
    if rows == 0 || cols == 0 {
        return Ok(Array1::zeros(cols));
    }

    let x = backend.least_squares_svd(matrix.into(), rhs.insert_axis(Axis(1)).into())?;
    Ok(x.index_axis_move(Axis(1), 0))
}

/// Solve `A x = b` for symmetric `A`.
///
/// Symmetry is not exploited; this is [`solve`], which keeps the behavior on nearly
/// singular matrices identical to the general case.
pub fn solve_symmetric(matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
{ solve(matrix, rhs) }

pub fn solve_symmetric_with<D>(backend: &D, matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
where D: Decompositions + ?Sized,
{ solve_with(backend, matrix, rhs) }

/// Solve `A x = b` in the least squares sense.  Same as [`solve`].
pub fn solve_least_squares(matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
{ solve(matrix, rhs) }

pub fn solve_least_squares_with<D>(backend: &D, matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError>
where D: Decompositions + ?Sized,
{ solve_with(backend, matrix, rhs) }

/// Inverse of a square matrix, by LU-solving against the identity.
///
/// Fails with [`LinalgError::SingularMatrix`] rather than producing anything approximate.
pub fn invert(matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>, LinalgError>
{ invert_with(&default_backend(), matrix) }

pub fn invert_with<D>(backend: &D, matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>, LinalgError>
where D: Decompositions + ?Sized,
{
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(dimension_mismatch(format!("cannot invert a non-square {}x{} matrix", rows, cols)));
    }
    check_finite(matrix.iter())?;

    if rows == 0 {
        return Ok(Array2::zeros((0, 0)));
    }
    let inverse = backend.lu_solve(matrix.into(), Array2::<f64>::eye(rows).into())?;
    Ok(inverse.into_inner())
}
