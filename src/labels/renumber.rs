//! Compaction of label images to consecutive labels
//!
//! A label image marks background with 0 and regions with any other integer.
//! Renumbering maps the distinct non-zero labels, in ascending order, onto
//! `1..=k` and keeps the background at 0.

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};
use num_traits::{PrimInt, cast};
use tracing::debug;

use crate::cartesian::ops::zip_map;
use crate::cartesian::permutations::all_permutations_equal;
use crate::io::error::{Result, overflow};
use crate::view::AsStridedView;

/// Distinct non-zero labels of an image in ascending order
pub fn unique_nonzero_labels<L, S, D>(image: &ArrayBase<S, D>) -> Vec<L>
where
    L: PrimInt,
    S: Data<Elem = L>,
    D: Dimension,
{
    let mut labels: Vec<L> = image.iter().copied().filter(|label| !label.is_zero()).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// Replace the non-zero labels of an image with `1..=k`, preserving order
///
/// One mask per distinct label is built with the cartesian equality
/// operator, each mask is weighted by its new label through a broadcast view
/// of `1..=k`, and the masks are summed over the label axis. Masks are
/// disjoint, so the sum selects exactly one new label per labelled pixel.
/// Cost is `O(k * n)` for `k` labels and `n` pixels.
///
/// # Errors
///
/// Returns `Overflow` if `k` does not fit the label type.
pub fn renumber_label_image<L, S, D>(image: &ArrayBase<S, D>) -> Result<Array<L, D>>
where
    L: PrimInt,
    S: Data<Elem = L>,
    D: Dimension,
{
    let image = image.as_standard_layout();
    let old_labels = unique_nonzero_labels(&image);
    let count = old_labels.len();

    let new_labels: Vec<L> = (1..=count)
        .map(|label| {
            cast(label).ok_or_else(|| {
                overflow(
                    "label count",
                    &count,
                    &cast::<L, u128>(L::max_value()).unwrap_or(u128::MAX),
                )
            })
        })
        .collect::<Result<_>>()?;

    let masks = all_permutations_equal(&old_labels, &image)?;
    let new_labels_tiled = new_labels
        .as_strided_view()?
        .expand_or_keep(&[], image.shape())?;

    let weighted = zip_map(
        &masks.as_strided_view()?,
        &new_labels_tiled,
        &|&selected: &bool, &label: &L| if selected { label } else { L::zero() },
    )?;
    let relabeled = weighted.sum_axis(Axis(0));

    debug!(
        shape = ?image.shape(),
        labels = count,
        "renumbered label image"
    );
    Ok(relabeled.into_dimensionality::<D>()?)
}
