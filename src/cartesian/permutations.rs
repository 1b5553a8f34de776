//! Cartesian broadcasting of a binary operator over two arrays
//!
//! `all_permutations_operation(op, a, b)[i ++ j] == op(a[i], b[j])` for every
//! index `i` of `a` and `j` of `b`. Both operands are tiled with broadcast
//! axes so they share the shape `a.shape ++ b.shape`, then the operator is
//! applied once per position. Time and memory are `O(|a| * |b|)`; callers
//! are expected to pass small label or coordinate sets rather than images on
//! both sides.

use ndarray::ArrayD;
use tracing::debug;

use crate::cartesian::ops::{Equal, PairOp, zip_map};
use crate::io::error::{ArrayError, Result};
use crate::view::{AsStridedView, StridedView};

/// View an operand in place, or a standard-layout copy of it kept in `copy`
fn operand_view<'a, T, V>(operand: &'a V, copy: &'a mut Option<ArrayD<T>>) -> Result<StridedView<'a, T>>
where
    T: Clone,
    V: AsStridedView<T> + ?Sized,
{
    match operand.as_strided_view() {
        Err(ArrayError::Layout { reason }) => {
            debug!(%reason, "copying operand to standard layout");
            let array: &'a ArrayD<T> = copy.insert(operand.to_standard_array()?);
            array.as_strided_view()
        }
        view => view,
    }
}

/// Apply `op` to every pair of elements drawn from `lhs` and `rhs`
///
/// The result is freshly allocated with shape `lhs.shape ++ rhs.shape`.
/// Operands with zero elements give an empty result, and a 0-dimensional
/// operand contributes no axes. Operands are read in place when their memory
/// is one block; other `ndarray` layouts are copied to standard layout first.
///
/// # Errors
///
/// Returns `Overflow` when the result would hold more than `usize::MAX`
/// elements.
pub fn all_permutations_operation<A, B, Op, L, R>(op: Op, lhs: &L, rhs: &R) -> Result<ArrayD<Op::Output>>
where
    A: Clone,
    B: Clone,
    Op: PairOp<A, B>,
    L: AsStridedView<A> + ?Sized,
    R: AsStridedView<B> + ?Sized,
{
    let (mut lhs_copy, mut rhs_copy) = (None, None);
    let lhs = operand_view(lhs, &mut lhs_copy)?;
    let rhs = operand_view(rhs, &mut rhs_copy)?;

    // lhs repeats across every position of rhs and vice versa
    let lhs_tiled = lhs.expand_or_keep(&[], rhs.dims())?;
    let rhs_tiled = rhs.expand_or_keep(lhs.dims(), &[])?;

    debug!(
        lhs = ?lhs.dims(),
        rhs = ?rhs.dims(),
        elements = lhs_tiled.len(),
        "cartesian operation"
    );
    zip_map(&lhs_tiled, &rhs_tiled, &op)
}

/// Compare every pair of elements drawn from `lhs` and `rhs` for equality
///
/// # Errors
///
/// Same as [`all_permutations_operation`].
pub fn all_permutations_equal<A, B, L, R>(lhs: &L, rhs: &R) -> Result<ArrayD<bool>>
where
    A: Clone + PartialEq<B>,
    B: Clone,
    L: AsStridedView<A> + ?Sized,
    R: AsStridedView<B> + ?Sized,
{
    all_permutations_operation(Equal, lhs, rhs)
}
