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

use crate::errors::{dimension_mismatch, numerical_failure, LinalgError};

use ndarray::{Array, Array2, ArrayBase, ArrayView2, Data, Ix2};
use slice_of_array::prelude::*;
use slice_of_array::IsSliceomorphic;

/// Owned, contiguous, C-order matrix data.
///
/// This is the form in which every matrix is handed to a decomposition backend.
/// LAPACKe wants one of the strides to be 1, and nalgebra can be filled directly
/// from row-major data, so both are served by the same layout.
///
/// Being owned, a `CMatrix` can be destroyed in place by a backend without
/// affecting anything the caller still holds.
#[derive(Debug, Clone, PartialEq)]
pub struct CMatrix<A = f64>(
    // invariant: .is_standard_layout()
    Array2<A>
);

impl<A> CMatrix<A> {
    pub fn into_inner(self) -> Array2<A> { self.0 }
    pub fn c_order_data(&self) -> &[A] { self.0.as_slice().expect("(BUG) not c-order!!") }
    pub fn c_order_data_mut(&mut self) -> &mut [A] { self.0.as_slice_mut().expect("(BUG) not c-order!!") }
    pub fn stride(&self) -> usize { self.0.ncols() }
}

impl<A: Clone> CMatrix<A> {
    /// Build from a list of rows, as in `double[n][m]`.
    ///
    /// Every row must have the same length.  An empty list gives a `0x0` matrix.
    pub fn try_from_rows(rows: &[Vec<A>]) -> Result<Self, LinalgError> {
        let width = rows.first().map_or(0, |row| row.len());
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(dimension_mismatch(format!(
                "row {} has length {}, but row 0 has length {}", i, row.len(), width,
            )));
        }
        let data = rows.iter().flat_map(|row| row.iter().cloned()).collect();
        Array::from_shape_vec((rows.len(), width), data)
            .map(CMatrix)
            .map_err(|e| dimension_mismatch(e.to_string()))
    }

    /// The inverse of `try_from_rows`.
    pub fn to_rows(&self) -> Vec<Vec<A>> {
        match self.stride() {
            0 => vec![vec![]; self.0.nrows()],
            stride => self.c_order_data().chunks(stride).map(|row| row.to_vec()).collect(),
        }
    }
}

impl CMatrix<f64> {
    pub fn eye(n: usize) -> Self { CMatrix(Array2::eye(n)) }

    /// Fails on the first NaN or infinity.
    ///
    /// Backends are free to loop forever on such input, so this runs before handing anything off.
    pub fn check_finite(&self) -> Result<(), LinalgError> {
        check_finite(self.c_order_data())
    }
}

pub(crate) fn check_finite<'a>(values: impl IntoIterator<Item = &'a f64>) -> Result<(), LinalgError> {
    match values.into_iter().find(|x| !x.is_finite()) {
        None => Ok(()),
        Some(x) => Err(numerical_failure(format!("input contains a non-finite value ({})", x))),
    }
}

impl<A> ::std::ops::Deref for CMatrix<A> {
    type Target = Array2<A>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<'a, A, V> From<&'a [V]> for CMatrix<A>
where
    A: Clone,
    V: IsSliceomorphic<Element = A>,
{
    fn from(slice: &'a [V]) -> Self {
        CMatrix(Array::from_shape_vec(
            (slice.len(), V::LEN),
            slice.flat().to_vec(),
        ).expect("BUG"))
    }
}

impl<A, V> From<Vec<V>> for CMatrix<A>
where
    A: Clone,
    V: IsSliceomorphic<Element = A>,
{
    fn from(vec: Vec<V>) -> Self { (&vec[..]).into() }
}

impl<A: Clone> From<Array2<A>> for CMatrix<A> {
    fn from(arr: Array2<A>) -> Self {
        match arr.is_standard_layout() {
            true => CMatrix(arr),
            false => arr.view().into(),
        }
    }
}

impl<'a, A: Clone> From<ArrayView2<'a, A>> for CMatrix<A> {
    fn from(arr: ArrayView2<'a, A>) -> Self {
        let dim = arr.raw_dim();
        let data = match arr.as_slice() {
            Some(data) => data.to_vec(),
            // `iter()` walks in logical order no matter the strides
            None => arr.iter().cloned().collect(),
        };
        CMatrix(Array::from_shape_vec(dim, data).expect("BUG"))
    }
}

impl<'a, A: Clone, S> From<&'a ArrayBase<S, Ix2>> for CMatrix<A>
where S: Data<Elem = A>,
{
    fn from(arr: &'a ArrayBase<S, Ix2>) -> Self { arr.view().into() }
}
