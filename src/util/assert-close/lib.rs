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

//! Approximate equality assertions for tests.
//!
//! ```ignore
//! assert_close!(1.0, 1.0 + 1e-12);                    // default: rel=1e-9, abs=0
//! assert_close!(abs=1e-10, computed_matrix, expected_matrix);
//! assert_close!(rel=1e-6, abs=1e-12, xs, ys, "iteration {}", i);
//! ```

#[macro_use]
extern crate failure;

use ndarray::{ArrayBase, Data, Dimension};
use std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}};
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut abs;
            let mut rel;
            $(
                assert_close_impl!{@stmt::assign [abs, rel] $assignment}
            )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, $crate::Tolerances { abs, rel }) {
                panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                 format!($($fmt)*), rel, abs, a, b, e);
            }
        }
    };
    (@stmt::assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@stmt::assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

/// `|a - b| < max(abs, rel * |a|, rel * |b|)`, with exactly equal values (infinities
/// included) always close and NaN never close.
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    if a == b { return true; }
    if a.is_infinite() || b.is_infinite() { return false; }

    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

#[derive(Debug, Fail)]
pub enum CheckCloseError {
    #[fail(display = "shapes differ: {:?} vs {:?}", _0, _1)]
    Shape(Vec<usize>, Vec<usize>),

    /// `index` is the flat (row-major) position of the first bad element.
    #[fail(display = "failed at index {}:\n  left: {:?}\n right: {:?}", index, left, right)]
    Value { index: usize, left: f64, right: f64 },
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::Value { index: 0, left: *self, right: *other }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

fn check_flat<'a>(
    left: impl ExactSizeIterator<Item = &'a f64>,
    right: impl ExactSizeIterator<Item = &'a f64>,
    tol: Tolerances,
) -> Result<(), CheckCloseError> {
    if left.len() != right.len() {
        return Err(CheckCloseError::Shape(vec![left.len()], vec![right.len()]));
    }
    for (index, (&l, &r)) in left.zip(right).enumerate() {
        if !is_close(l, r, tol) {
            return Err(CheckCloseError::Value { index, left: l, right: r });
        }
    }
    Ok(())
}

impl CheckClose for [f64] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { check_flat(self.iter(), other.iter(), tol) }
}

impl CheckClose for Vec<f64> {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { check_flat(self.iter(), other.iter(), tol) }
}

impl CheckClose<[f64]> for Vec<f64> {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CheckCloseError>
    { check_flat(self.iter(), other.iter(), tol) }
}

/// Arrays of any dimension and storage.  Shapes must match exactly.
impl<S1, S2, D> CheckClose<ArrayBase<S2, D>> for ArrayBase<S1, D>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    fn check_close(&self, other: &ArrayBase<S2, D>, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.shape() != other.shape() {
            return Err(CheckCloseError::Shape(self.shape().to_vec(), other.shape().to_vec()));
        }
        check_flat(self.iter(), other.iter(), tol)
    }
}

impl fmt::Display for Tolerances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rel={}, abs={}", self.rel, self.abs)
    }
}
