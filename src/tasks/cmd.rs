//! What the binaries actually do, minus argument parsing and file handling.

use crate::config::Settings;
use crate::FailResult;

use factorlab_linalg as linalg;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::time::Instant;

/// Which factor matrix to compute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FactorMethod {
    /// Plain PCA.
    Pca,
    /// PCA with renormalized rows, to stay close to a unit diagonal.
    Reduction,
}

/// What to hand back from a factor computation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FactorOutput {
    /// The `n x k` factor matrix.
    Factors,
    /// The `n x n` correlation matrix it implies.
    Correlation,
}

pub fn run_factors(
    settings: &Settings,
    correlation: ArrayView2<'_, f64>,
    num_factors: usize,
    method: FactorMethod,
    output: FactorOutput,
) -> FailResult<Array2<f64>> {
    let backend = settings.build_backend()?;
    info!("{:?} of a {}x{} matrix to {} factors", method, correlation.nrows(), correlation.ncols(), num_factors);

    let start = Instant::now();
    let factors = match method {
        FactorMethod::Pca => linalg::factor_matrix_with(&backend, correlation, num_factors)?,
        FactorMethod::Reduction => linalg::factor_reduction_with(&backend, correlation, num_factors)?,
    };
    debug!("factorization took {:?}", start.elapsed());

    if method == FactorMethod::Reduction {
        let worst = max_diagonal_error(&factors);
        info!("largest deviation from unit diagonal: {:e}", worst);
    }

    Ok(match output {
        FactorOutput::Factors => factors,
        FactorOutput::Correlation => linalg::reconstruct(factors.view()),
    })
}

pub fn run_invert(settings: &Settings, matrix: ArrayView2<'_, f64>) -> FailResult<Array2<f64>> {
    let backend = settings.build_backend()?;
    info!("inverting a {}x{} matrix", matrix.nrows(), matrix.ncols());
    Ok(linalg::invert_with(&backend, matrix)?)
}

pub fn run_solve(settings: &Settings, matrix: ArrayView2<'_, f64>, rhs: ArrayView1<'_, f64>) -> FailResult<Array1<f64>> {
    let backend = settings.build_backend()?;
    info!("solving a {}x{} system", matrix.nrows(), matrix.ncols());

    let x = linalg::solve_with(&backend, matrix, rhs)?;
    let residual = &matrix.dot(&x) - &rhs;
    info!("residual norm: {:e}", residual.dot(&residual).sqrt());
    Ok(x)
}

// |diag(F F^T) - 1|, maximized over rows
fn max_diagonal_error(factors: &Array2<f64>) -> f64 {
    factors.outer_iter()
        .map(|row| (row.dot(&row) - 1.0).abs())
        .fold(0.0, f64::max)
}
