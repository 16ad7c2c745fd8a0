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

//! Dense linear algebra for correlation models.
//!
//! * [`solve`] and friends: linear systems through an SVD pseudo-inverse.
//! * [`invert`]: matrix inverse through LU.
//! * [`factor_matrix`]: PCA of a symmetric matrix.
//! * [`factor_reduction`]: low rank factor model of a correlation matrix which
//!   (approximately) keeps its unit diagonal.
//!
//! Every operation has a `*_with` form taking the [`Decompositions`] backend to use.
//! All of them are pure functions; inputs are never modified.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate itertools;
#[cfg(test)]
#[macro_use]
extern crate factorlab_assert_close;

#[cfg(feature = "lapacke-backend")]
extern crate lapack_src;

pub use crate::errors::LinalgError;
mod errors;

pub use crate::c_matrix::CMatrix;
mod c_matrix;

pub use crate::settings::{BackendKind, BackendSettings, DEFAULT_SINGULARITY_THRESHOLD};
mod settings;

pub use crate::backend::{default_backend, DefaultBackend, Decompositions, Nalgebra, SymmetricEigen};
#[cfg(feature = "lapacke-backend")]
pub use crate::backend::Lapacke;
pub mod backend;

pub use crate::solve::{solve, solve_with, solve_symmetric, solve_symmetric_with};
pub use crate::solve::{solve_least_squares, solve_least_squares_with, invert, invert_with};
mod solve;

pub use crate::factors::{factor_matrix, factor_matrix_with, reconstruct};
mod factors;

pub use crate::reduction::{factor_reduction, factor_reduction_with, renormalize_rows};
mod reduction;

#[cfg(test)]
mod test_util;
