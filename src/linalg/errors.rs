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

/// Everything that can go wrong in this crate.
///
/// Nothing here is ever retried; the operations are deterministic, so the same input
/// would only fail the same way again.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum LinalgError {
    /// Shapes of the inputs do not fit together. Raised before any computation.
    #[fail(display = "dimension mismatch: {}", _0)]
    DimensionMismatch(String),

    /// A pivot of the LU decomposition fell below the singularity threshold.
    #[fail(display = "matrix is numerically singular")]
    SingularMatrix,

    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The backend could not produce a decomposition (non-convergence, non-finite input).
    #[fail(display = "numerical failure: {}", _0)]
    NumericalFailure(String),
}

pub(crate) fn dimension_mismatch(msg: impl Into<String>) -> LinalgError
{ LinalgError::DimensionMismatch(msg.into()) }

pub(crate) fn invalid_argument(msg: impl Into<String>) -> LinalgError
{ LinalgError::InvalidArgument(msg.into()) }

pub(crate) fn numerical_failure(msg: impl Into<String>) -> LinalgError
{ LinalgError::NumericalFailure(msg.into()) }
