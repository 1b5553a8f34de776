//! Strided view descriptor over a borrowed buffer
//!
//! A [`StridedView`] is pure layout metadata: a shape, one step size per axis
//! and a base offset into a slice it borrows but never owns. Axes with a step
//! of 0 are broadcast axes; every index along them reads the same element.
//! Every address a view can produce is checked against its buffer when the
//! view is built, so reading through a view never leaves the buffer.

use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

use crate::io::error::{ArrayError, Result, layout_error, overflow};

/// Validate that every reachable offset stays within `[0, len)`
///
/// Empty views (any extent of 0) address nothing and are always valid.
///
/// # Errors
///
/// Returns `InvalidArgument` when `dims` and `strides` differ in length,
/// `Overflow` when the element count does not fit `usize` and `OutOfBounds`
/// when an offset leaves the buffer or overflows.
pub fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(crate::io::error::invalid_argument(
            "strides",
            &format!("{strides:?}"),
            &format!("expected {} step sizes for shape {dims:?}", dims.len()),
        ));
    }
    if dims.contains(&0) {
        return Ok(());
    }
    element_count(dims)?;

    let out_of_bounds = || ArrayError::OutOfBounds { offset, len };
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides) {
        let last = isize::try_from(dim - 1).map_err(|_| out_of_bounds())?;
        let end = stride.checked_mul(last).ok_or_else(out_of_bounds)?;
        if end >= 0 {
            max_offset = max_offset.checked_add(end).ok_or_else(out_of_bounds)?;
        } else {
            min_offset = min_offset.checked_add(end).ok_or_else(out_of_bounds)?;
        }
    }

    if min_offset < 0 {
        return Err(ArrayError::OutOfBounds {
            offset: min_offset,
            len,
        });
    }
    if max_offset.unsigned_abs() >= len {
        return Err(ArrayError::OutOfBounds {
            offset: max_offset,
            len,
        });
    }
    Ok(())
}

/// Number of elements addressed by `dims`
///
/// # Errors
///
/// Returns `Overflow` if the count does not fit `usize`.
pub fn element_count(dims: &[usize]) -> Result<usize> {
    if dims.contains(&0) {
        return Ok(0);
    }
    dims.iter()
        .try_fold(1usize, |count, &dim| count.checked_mul(dim))
        .ok_or_else(|| overflow("element count", &format!("product of {dims:?}"), &usize::MAX))
}

/// Row-major step sizes for a shape (last index varies fastest)
pub fn row_major_strides(dims: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; dims.len()];
    let mut step = 1isize;
    for (stride, &dim) in strides.iter_mut().zip(dims).rev() {
        *stride = step;
        step = step.saturating_mul(isize::try_from(dim).unwrap_or(isize::MAX));
    }
    strides
}

/// Immutable strided view over a borrowed buffer
///
/// Cloning a view copies the descriptor only; the buffer stays shared.
pub struct StridedView<'a, T> {
    data: &'a [T],
    dims: Vec<usize>,
    strides: Vec<isize>,
    offset: isize,
}

// No `T: Clone` bound: elements are never cloned
impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<T> std::fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedView")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("buffer_len", &self.data.len())
            .finish()
    }
}

impl<'a, T> StridedView<'a, T> {
    /// Create a view after checking that it stays inside `data`
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor could address memory outside of
    /// `data` (see [`validate_bounds`]).
    pub fn new(data: &'a [T], dims: &[usize], strides: &[isize], offset: isize) -> Result<Self> {
        validate_bounds(data.len(), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: dims.to_vec(),
            strides: strides.to_vec(),
            offset,
        })
    }

    /// Contiguous row-major view over a whole slice
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the element count of `dims` does not fit `usize`
    /// and `InvalidArgument` if `dims` holds more elements than `data`.
    pub fn row_major(data: &'a [T], dims: &[usize]) -> Result<Self> {
        let expected = element_count(dims)?;
        if expected > data.len() {
            return Err(crate::io::error::invalid_argument(
                "dims",
                &format!("{dims:?}"),
                &format!("needs {expected} elements, buffer holds {}", data.len()),
            ));
        }
        Self::new(data, dims, &row_major_strides(dims), 0)
    }

    /// Extent of every axis
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Step size of every axis, in elements
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Offset of the first element inside the buffer
    pub const fn offset(&self) -> isize {
        self.offset
    }

    /// Number of axes
    pub const fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of logical elements (broadcast repetitions included)
    pub fn len(&self) -> usize {
        // Checked when the view was built
        element_count(&self.dims).unwrap_or(usize::MAX)
    }

    /// Whether the view has no elements
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    /// Backing buffer shared with the array the view was derived from
    pub const fn buffer(&self) -> &'a [T] {
        self.data
    }

    /// Whether this view reads from exactly the given buffer
    pub fn shares_buffer(&self, buffer: &[T]) -> bool {
        std::ptr::eq(self.data, buffer)
    }

    /// Axes whose step size is 0
    pub fn broadcast_axes(&self) -> Vec<usize> {
        self.strides
            .iter()
            .enumerate()
            .filter_map(|(axis, &stride)| (stride == 0).then_some(axis))
            .collect()
    }

    /// Element at a multi-index, or `None` if the index is invalid
    pub fn get(&self, index: &[usize]) -> Option<&'a T> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut offset = self.offset;
        for ((&i, &dim), &stride) in index.iter().zip(&self.dims).zip(&self.strides) {
            if i >= dim {
                return None;
            }
            offset += isize::try_from(i).ok()? * stride;
        }
        self.data.get(usize::try_from(offset).ok()?)
    }

    /// Iterate over the elements in row-major logical order
    pub fn iter(&self) -> StridedIter<'a, T> {
        StridedIter {
            data: self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            index: vec![0; self.dims.len()],
            offset: self.offset,
            remaining: self.len(),
        }
    }

    /// Copy the viewed elements into a fresh standard-layout array
    ///
    /// # Errors
    ///
    /// Returns a `Layout` error if the shape cannot be allocated by `ndarray`.
    pub fn to_array(&self) -> Result<ArrayD<T>>
    where
        T: Clone,
    {
        let elements: Vec<T> = self.iter().cloned().collect();
        Ok(ArrayD::from_shape_vec(IxDyn(&self.dims), elements)?)
    }

    pub(crate) fn with_layout(&self, dims: Vec<usize>, strides: Vec<isize>) -> Result<Self> {
        validate_bounds(self.data.len(), &dims, &strides, self.offset)?;
        Ok(Self {
            data: self.data,
            dims,
            strides,
            offset: self.offset,
        })
    }
}

impl<'a, T> IntoIterator for &StridedView<'a, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the elements of a [`StridedView`]
#[derive(Debug, Clone)]
pub struct StridedIter<'a, T> {
    data: &'a [T],
    dims: Vec<usize>,
    strides: Vec<isize>,
    index: Vec<usize>,
    offset: isize,
    remaining: usize,
}

impl<'a, T> Iterator for StridedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.data.get(usize::try_from(self.offset).ok()?)?;
        self.remaining -= 1;

        // Odometer step: bump the last axis, carry into earlier ones
        for ((i, &dim), &stride) in self
            .index
            .iter_mut()
            .zip(&self.dims)
            .zip(&self.strides)
            .rev()
        {
            if *i + 1 < dim {
                *i += 1;
                self.offset += stride;
                break;
            }
            self.offset -= stride * (*i as isize);
            *i = 0;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for StridedIter<'_, T> {}

/// Types whose elements can be described by a [`StridedView`] without copying
pub trait AsStridedView<T> {
    /// Borrow the elements as a strided view
    ///
    /// # Errors
    ///
    /// Returns a `Layout` error when the memory is not one contiguous block.
    fn as_strided_view(&self) -> Result<StridedView<'_, T>>;

    /// Copy the elements into a standard-layout array
    ///
    /// Used where a copy is acceptable and the memory layout cannot be
    /// described by a view.
    ///
    /// # Errors
    ///
    /// Returns a `Layout` error if the shape cannot be allocated by `ndarray`.
    fn to_standard_array(&self) -> Result<ArrayD<T>>
    where
        T: Clone;
}

impl<T> AsStridedView<T> for StridedView<'_, T> {
    fn as_strided_view(&self) -> Result<StridedView<'_, T>> {
        Ok(self.clone())
    }

    fn to_standard_array(&self) -> Result<ArrayD<T>>
    where
        T: Clone,
    {
        self.to_array()
    }
}

impl<T> AsStridedView<T> for [T] {
    fn as_strided_view(&self) -> Result<StridedView<'_, T>> {
        StridedView::row_major(self, &[self.len()])
    }

    fn to_standard_array(&self) -> Result<ArrayD<T>>
    where
        T: Clone,
    {
        Ok(ArrayD::from_shape_vec(IxDyn(&[self.len()]), self.to_vec())?)
    }
}

impl<T> AsStridedView<T> for Vec<T> {
    fn as_strided_view(&self) -> Result<StridedView<'_, T>> {
        self.as_slice().as_strided_view()
    }

    fn to_standard_array(&self) -> Result<ArrayD<T>>
    where
        T: Clone,
    {
        self.as_slice().to_standard_array()
    }
}

/// Arrays whose elements form one block of memory, in any axis order or
/// direction, are viewed in place. Other layouts (a column, a stepped slice)
/// cannot be addressed through a single slice without `unsafe` and report a
/// `Layout` error; [`AsStridedView::to_standard_array`] copies them instead.
impl<S, D> AsStridedView<S::Elem> for ArrayBase<S, D>
where
    S: Data,
    D: Dimension,
{
    fn as_strided_view(&self) -> Result<StridedView<'_, S::Elem>> {
        let buffer = self.as_slice_memory_order().ok_or_else(|| {
            layout_error(&format!(
                "array of shape {:?} with strides {:?} is not contiguous in memory",
                self.shape(),
                self.strides()
            ))
        })?;

        // The slice starts at the lowest address; reversed axes push the
        // first logical element further in.
        let offset = if self.is_empty() {
            0
        } else {
            self.shape()
                .iter()
                .zip(self.strides())
                .filter(|&(_, &stride)| stride < 0)
                .map(|(&dim, &stride)| (dim as isize - 1) * -stride)
                .sum()
        };

        StridedView::new(buffer, self.shape(), self.strides(), offset)
    }

    fn to_standard_array(&self) -> Result<ArrayD<S::Elem>>
    where
        S::Elem: Clone,
    {
        Ok(self.as_standard_layout().into_owned().into_dyn())
    }
}

