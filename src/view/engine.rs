//! Zero-copy tiling and axis insertion
//!
//! Every operation here returns a new [`StridedView`] over the same buffer as
//! its input. Added axes always carry a step size of 0, so repeating an array
//! `R` times along a new axis costs the same regardless of `R`.

use tracing::trace;

use crate::io::error::{Result, invalid_argument};
use crate::view::descriptor::{AsStridedView, StridedView};

/// Repetition counts for the axes added by [`expand_view`]
///
/// A single count and a sequence of counts are both accepted and normalized
/// to a sequence. `Reps::none()` adds no axes on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reps(Vec<usize>);

impl Reps {
    /// No repetition axes
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Counts as a slice, one per added axis
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Whether no axes are requested
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<usize> for Reps {
    fn from(count: usize) -> Self {
        Self(vec![count])
    }
}

impl From<Vec<usize>> for Reps {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}

impl From<&[usize]> for Reps {
    fn from(counts: &[usize]) -> Self {
        Self(counts.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Reps {
    fn from(counts: [usize; N]) -> Self {
        Self(counts.to_vec())
    }
}

impl<const N: usize> From<&[usize; N]> for Reps {
    fn from(counts: &[usize; N]) -> Self {
        Self(counts.to_vec())
    }
}

/// Wrap any axis position into `[0, ndim]`
///
/// Negative positions count from the end, so `-1` means "after the last
/// axis". Positions beyond the range wrap around modulo `ndim + 1`.
pub const fn normalize_axis_position(pos: isize, ndim: usize) -> usize {
    let slots = ndim as isize + 1;
    pos.rem_euclid(slots).unsigned_abs()
}

impl<'a, T> StridedView<'a, T> {
    /// Insert broadcast axes with the given extents in front of axis `pos`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `pos` is greater than `ndim`.
    pub fn insert_broadcast_axes(&self, pos: usize, extents: &[usize]) -> Result<Self> {
        if pos > self.ndim() {
            return Err(invalid_argument(
                "pos",
                &pos,
                &format!("axis position must be at most {}", self.ndim()),
            ));
        }
        let (dims_before, dims_after) = self.dims().split_at(pos);
        let (strides_before, strides_after) = self.strides().split_at(pos);

        let dims = [dims_before, extents, dims_after].concat();
        let broadcast = vec![0; extents.len()];
        let strides = [strides_before, broadcast.as_slice(), strides_after].concat();
        self.with_layout(dims, strides)
    }

    /// Tile this view along new leading and trailing broadcast axes
    ///
    /// See [`expand_view`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when both `reps_before` and `reps_after` are
    /// empty.
    pub fn expand(&self, reps_before: impl Into<Reps>, reps_after: impl Into<Reps>) -> Result<Self> {
        let reps_before = reps_before.into();
        let reps_after = reps_after.into();
        if reps_before.is_empty() && reps_after.is_empty() {
            return Err(invalid_argument(
                "reps",
                &"()",
                &"no repetition axes requested",
            ));
        }

        let dims = [reps_before.as_slice(), self.dims(), reps_after.as_slice()].concat();
        let strides = [
            vec![0; reps_before.as_slice().len()].as_slice(),
            self.strides(),
            vec![0; reps_after.as_slice().len()].as_slice(),
        ]
        .concat();

        trace!(
            source = ?self.dims(),
            shape = ?dims,
            "expanded view"
        );
        self.with_layout(dims, strides)
    }

    /// Same as [`StridedView::expand`], but an empty request returns the view unchanged
    pub(crate) fn expand_or_keep(&self, reps_before: &[usize], reps_after: &[usize]) -> Result<Self> {
        if reps_before.is_empty() && reps_after.is_empty() {
            Ok(self.clone())
        } else {
            self.expand(reps_before, reps_after)
        }
    }
}

/// Tile an array along new broadcast axes without copying
///
/// The result has shape `reps_before ++ shape ++ reps_after` and step sizes
/// `0.. ++ strides ++ 0..`; it reads from the same buffer as `array`. A count
/// of 0 is accepted and yields an empty view.
///
/// # Errors
///
/// Returns `InvalidArgument` when both repetition lists are empty and a
/// `Layout` error when `array` is not contiguous in memory.
pub fn expand_view<'a, T, V>(
    array: &'a V,
    reps_before: impl Into<Reps>,
    reps_after: impl Into<Reps>,
) -> Result<StridedView<'a, T>>
where
    V: AsStridedView<T> + ?Sized,
{
    array.as_strided_view()?.expand(reps_before, reps_after)
}

/// Insert a length-1 axis at `pos`, wrapping the position into `[0, ndim]`
///
/// # Errors
///
/// Returns a `Layout` error when `array` is not contiguous in memory.
pub fn add_singleton_axis_pos<'a, T, V>(array: &'a V, pos: isize) -> Result<StridedView<'a, T>>
where
    V: AsStridedView<T> + ?Sized,
{
    let view = array.as_strided_view()?;
    let pos = normalize_axis_position(pos, view.ndim());
    view.insert_broadcast_axes(pos, &[1])
}

/// Insert a length-1 axis in front of all others
///
/// # Errors
///
/// Returns a `Layout` error when `array` is not contiguous in memory.
pub fn add_singleton_axis_beginning<'a, T, V>(array: &'a V) -> Result<StridedView<'a, T>>
where
    V: AsStridedView<T> + ?Sized,
{
    add_singleton_axis_pos(array, 0)
}

/// Insert a length-1 axis after all others
///
/// # Errors
///
/// Returns a `Layout` error when `array` is not contiguous in memory.
pub fn add_singleton_axis_end<'a, T, V>(array: &'a V) -> Result<StridedView<'a, T>>
where
    V: AsStridedView<T> + ?Sized,
{
    add_singleton_axis_pos(array, -1)
}
