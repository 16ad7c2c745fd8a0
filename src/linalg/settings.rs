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

use serde::{Deserialize, Serialize};

/// Pivots of an LU decomposition smaller than this (in absolute value) mark the matrix singular.
pub const DEFAULT_SINGULARITY_THRESHOLD: f64 = 1e-11;

/// Tuning knobs shared by all decomposition backends.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackendSettings {
    /// Absolute threshold on `|U_ii|` below which `invert` reports a singular matrix.
    pub singularity_threshold: f64,

    /// Iteration limit for the iterative eigen and singular value solvers.
    ///
    /// `0` means no limit.  Only honored by backends that expose such a limit;
    /// LAPACK picks its own.
    pub max_iterations: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            singularity_threshold: DEFAULT_SINGULARITY_THRESHOLD,
            max_iterations: 0,
        }
    }
}

/// Names a backend, for selecting one at runtime (e.g. from a config file).
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Nalgebra,
    Lapacke,
}

impl Default for BackendKind {
    fn default() -> Self { BackendKind::Nalgebra }
}
